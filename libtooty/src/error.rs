//! Error types for Tooty

use std::num::ParseIntError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TootyError>;

#[derive(Error, Debug)]
pub enum TootyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TootyError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TootyError::Queue(_) => 3,
            TootyError::Platform(PlatformError::Authentication(_)) => 2,
            TootyError::Platform(_) => 1,
            TootyError::Config(_) => 1,
            TootyError::Io(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read credentials file: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("Failed to decode credentials: {0}")]
    DecodeError(#[from] serde_json::Error),
}

/// Malformed queue entries
#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Invalid reply id '{value}': {source}")]
    InvalidReply {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Malformed media header '{value}': expected '<path>;<description>'")]
    MalformedMedia { value: String },
}

#[derive(Error, Debug, Clone)]
pub enum PlatformError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Content validation failed: {0}")]
    Validation(String),

    #[error("Media upload failed ({path}): {message}")]
    Upload { path: String, message: String },

    #[error("Posting failed: {0}")]
    Posting(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),
}
