use std::str::FromStr;

use thiserror::Error;
use vitals_tracker_data::database::{DatabaseError, StorageConfig};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A server variable holds an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Storage configuration was rejected
    #[error(transparent)]
    Storage(#[from] DatabaseError),
}

/// Server configuration, read from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the server listens on
    pub port: u16,
    /// Deployment environment reported by the health check
    pub environment: String,
    /// Storage backing the reading history
    pub storage: StorageConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: "development".to_string(),
            storage: StorageConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps variable names to values
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => u16::from_str(raw.trim())
                .map_err(|_| ConfigError::Invalid(format!("PORT must be a port number, got '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        let environment = lookup("APP_ENV")
            .map(|env| env.trim().to_string())
            .filter(|env| !env.is_empty())
            .unwrap_or_else(|| "development".to_string());

        Ok(Self {
            port,
            environment,
            storage: StorageConfig::from_lookup(&lookup)?,
        })
    }
}
