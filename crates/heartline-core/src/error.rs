//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A page declared a scene identity outside the fixed set.
    #[error("unknown scene identity: {0}")]
    UnknownScene(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// A key/value store could not be read or written.
    #[error("store error: {0}")]
    Store(String),

    /// The audio resource rejected an operation.
    #[error("audio error: {0}")]
    Audio(String),
}
