//! Error types for the biotape record model
//!
//! This module defines the errors shared across the workspace.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for record-model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the biotape record model
#[derive(Debug, Error)]
pub enum Error {
    /// Payload serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Record kind byte not in the registry
    #[error("Unknown record kind: 0x{0:02x}")]
    UnknownRecordKind(u8),
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
