//! Domain error types

use thiserror::Error;

/// Error when a provider name does not match any known push provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name} provider not found")]
pub struct ProviderNotFound {
    pub name: String,
}

/// Error when an invalid APNs environment is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid APNs environment: \"{input}\". Valid environments are: development, production")]
pub struct InvalidApnsEnvironmentError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
