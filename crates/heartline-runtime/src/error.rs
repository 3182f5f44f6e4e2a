//! Heartline: runtime error types.

use heartline_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the headless runtime.
#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The durable store could not be opened.
    #[error("store error: {0}")]
    Store(#[from] DomainError),

    /// Terminal or file I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
