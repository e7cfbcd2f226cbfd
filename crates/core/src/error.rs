//! Error types for mpc-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for mpc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for mpc-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid run configuration: age spec, credentials, settings file
    #[error("Configuration error: {0}")]
    Config(String),

    /// The storage client could not be built
    #[error("Failed to create storage client: {0}")]
    ClientConstruction(String),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network or service error
    #[error("Network error: {0}")]
    Network(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::TomlParse(_) => 2, // UsageError
            Error::Network(_) => 3,                      // NetworkError
            Error::Auth(_) => 4,                         // AuthError
            _ => 1,                                      // GeneralError
        }
    }
}
