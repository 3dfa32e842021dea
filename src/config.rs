//! Storage configuration loaded from the environment.
//!
//! - `TASKMATE_DATABASE_URL` - `PostgreSQL` connection URL. Falls back to
//!   `DATABASE_URL` when unset. Required.
//! - `TASKMATE_POOL_SIZE` - Maximum pooled connections. Defaults to `4`.

use std::env;
use thiserror::Error;

/// Primary environment variable holding the database URL.
pub const DATABASE_URL_VAR: &str = "TASKMATE_DATABASE_URL";

/// Conventional fallback for the database URL.
pub const FALLBACK_DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable holding the connection pool size.
pub const POOL_SIZE_VAR: &str = "TASKMATE_POOL_SIZE";

/// Pool size used when [`POOL_SIZE_VAR`] is unset.
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set or is blank.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// A variable is set to an unusable value.
    #[error("invalid value for {name}: {value}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Connection settings for the task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    database_url: String,
    pool_size: u32,
}

impl StoreConfig {
    /// Creates a configuration with the default pool size.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    /// Overrides the pool size.
    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing or the pool
    /// size is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing or the pool
    /// size is not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = non_blank(DATABASE_URL_VAR)
            .or_else(|| non_blank(FALLBACK_DATABASE_URL_VAR))
            .ok_or(ConfigError::MissingEnvVar(DATABASE_URL_VAR))?;

        let pool_size = non_blank(POOL_SIZE_VAR)
            .map(|raw| parse_pool_size(&raw))
            .transpose()?
            .unwrap_or(DEFAULT_POOL_SIZE);

        Ok(Self {
            database_url,
            pool_size,
        })
    }

    /// Returns the database URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }
}

fn parse_pool_size(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| ConfigError::InvalidValue {
            name: POOL_SIZE_VAR,
            value: raw.to_owned(),
        })
}
