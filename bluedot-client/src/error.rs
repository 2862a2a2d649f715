//! Client error types

use std::path::PathBuf;

use bluedot_core::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Config(ConfigError),

    #[error("{field} is too long ({max} bytes max)")]
    TooLong { field: &'static str, max: usize },

    #[error("could not connect to {target} after {attempts} attempts: {source}")]
    Connect {
        target: String,
        attempts: u8,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start thread: {0}")]
    Spawn(#[source] std::io::Error),
}

impl From<ConfigError> for ClientError {
    fn from(e: ConfigError) -> Self {
        ClientError::Config(e)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
