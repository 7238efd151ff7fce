//! Gitgram error types

use thiserror::Error;

/// Gitgram error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Telegram relay error
    #[error("Telegram error: {0}")]
    Telegram(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for gitgram operations
pub type Result<T> = std::result::Result<T, Error>;
