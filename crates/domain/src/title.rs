//! Validated task title.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when validating a title.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TitleError {
    /// The title is empty or contains only whitespace.
    #[error("Title is required")]
    Empty,
}

/// A task title that is never empty or whitespace-only.
///
/// Surrounding whitespace is trimmed on construction, so the stored value is
/// exactly what gets persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    /// Validates and trims a raw title.
    ///
    /// # Errors
    ///
    /// Returns [`TitleError::Empty`] if nothing remains after trimming.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, TitleError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TitleError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the title and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Title {
    type Error = TitleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Title> for String {
    fn from(title: Title) -> Self {
        title.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================
