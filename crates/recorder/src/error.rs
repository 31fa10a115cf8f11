//! Error types for the recorder
//!
//! Operations on the writer, channel, and reader all surface
//! [`RecorderError`]; the per-layer errors convert into it with `?`.

use crate::codec::CodecError;
use crate::format::FrameError;
use thiserror::Error;

/// Result type alias for recorder operations
pub type Result<T> = std::result::Result<T, RecorderError>;

/// Error types for recorder operations
#[derive(Debug, Error)]
pub enum RecorderError {
    /// I/O error from the log file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Write attempted while the channel is closed
    #[error("Channel is closed")]
    ChannelClosed,

    /// Frame encode/decode error
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    /// Codec transformation error
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Record model error (payload encoding)
    #[error("Record error: {0}")]
    Record(#[from] biotape_core::Error),
}
