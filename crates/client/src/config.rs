//! Terminal client configuration.
//!
//! # Environment Variables
//!
//! - `TASKTRACKER_API_URL`: server base URL (default: `http://127.0.0.1:3000`)
//! - `TASKTRACKER_LOG`: log file path; logging is off when unset

use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub log_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_path: None,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Blank values count as unset.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            api_url: read("TASKTRACKER_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            log_path: read("TASKTRACKER_LOG").map(PathBuf::from),
        }
    }
}
