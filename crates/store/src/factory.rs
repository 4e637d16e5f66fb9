//! Store factory for runtime backend selection.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
//!
//! # Example
//!
//! ```ignore
//! let config = StoreConfig::from_env()?;
//! let store = StoreFactory::new(config).create().await?;
//! store.initialize().await?;
//! ```

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::in_memory::InMemoryTaskStore;
use crate::postgres::PostgresTaskStore;
use crate::store::SharedTaskStore;

/// Default size of the `PostgreSQL` connection pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// =============================================================================
// Configuration Types
// =============================================================================

/// Which backend holds the task documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local map. Suitable for development and tests.
    #[default]
    InMemory,
    /// `PostgreSQL` table of JSONB documents.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    /// Parses a storage mode from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if the string is not recognized.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Configuration for [`StoreFactory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Backend to use.
    pub storage_mode: StorageMode,
    /// `PostgreSQL` connection URL (required when `storage_mode` is `Postgres`).
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl StoreConfig {
    /// Creates an in-memory configuration.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Creates a `PostgreSQL` configuration for `database_url`.
    #[must_use]
    pub fn postgres(database_url: impl Into<String>) -> Self {
        Self {
            storage_mode: StorageMode::Postgres,
            database_url: Some(database_url.into()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a variable holds an invalid value or
    /// `DATABASE_URL` is missing when `STORAGE_MODE=postgres`.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a configuration from an arbitrary key lookup.
    ///
    /// Empty or whitespace-only values count as unset.
    ///
    /// # Errors
    ///
    /// See [`StoreConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let storage_mode = read("STORAGE_MODE")
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or_default();

        let max_connections = match read("DATABASE_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(value) => match value.parse::<u32>() {
                Ok(count) if count > 0 => count,
                _ => return Err(ConfigurationError::InvalidMaxConnections(value)),
            },
        };

        let config = Self {
            storage_mode,
            database_url: read("DATABASE_URL"),
            max_connections,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingDatabaseUrl` if `PostgreSQL` is
    /// selected without a URL.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.storage_mode == StorageMode::Postgres && self.database_url.is_none() {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }
        Ok(())
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors in store configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Invalid storage mode value.
    #[error("Invalid storage mode: '{0}'. Expected 'in_memory' or 'postgres'")]
    InvalidStorageMode(String),

    /// Invalid pool size value.
    #[error("Invalid DATABASE_MAX_CONNECTIONS: '{0}'. Expected a positive integer")]
    InvalidMaxConnections(String),

    /// Missing `DATABASE_URL` when storage mode is Postgres.
    #[error("DATABASE_URL environment variable is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,
}

/// Errors that can occur while creating a store.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    DatabaseConnection(String),
}

// =============================================================================
// Store Factory
// =============================================================================

/// Creates the configured [`TaskStore`](crate::TaskStore) backend.
#[derive(Debug, Clone)]
pub struct StoreFactory {
    config: StoreConfig,
}

impl StoreFactory {
    /// Creates a new factory with the given configuration.
    #[must_use]
    pub const fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this factory.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Creates the store, connecting to the database when needed.
    ///
    /// The returned store still has to be initialized.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the configuration is invalid or the
    /// database connection fails.
    pub async fn create(&self) -> Result<SharedTaskStore, FactoryError> {
        self.config.validate()?;

        match self.config.storage_mode {
            StorageMode::InMemory => {
                tracing::info!("Using in-memory task store");
                Ok(Arc::new(InMemoryTaskStore::new()))
            }
            StorageMode::Postgres => {
                let database_url = self
                    .config
                    .database_url
                    .as_deref()
                    .ok_or(ConfigurationError::MissingDatabaseUrl)?;

                let pool = PgPoolOptions::new()
                    .max_connections(self.config.max_connections)
                    .connect(database_url)
                    .await
                    .map_err(|error| FactoryError::DatabaseConnection(error.to_string()))?;

                tracing::info!(
                    max_connections = self.config.max_connections,
                    "Connected to PostgreSQL task store"
                );
                Ok(Arc::new(PostgresTaskStore::new(pool)))
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
