//! Recording layer for biotape
//!
//! This crate handles everything between caller-supplied telemetry and disk:
//!
//! - SessionWriter: buffered, thread-safe record intake with atomic flush
//!   and discard
//! - Timestamp policies: library-managed clock (legacy) or caller-managed
//!   (explicit)
//! - Binary on-disk session log format (length-prefixed, CRC-protected,
//!   appendable frames)
//! - LogReader: in-order readback for verification and replay tooling
//! - Log codec abstraction (encryption/compression extension point)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer; // In-memory holding area with count/size accounting
pub mod channel; // Append-only file channel, open/close lifecycle
pub mod codec; // Log codec abstraction (identity, future encryption/compression)
pub mod config; // Recording application identity
pub mod error; // Crate-level error and result types
pub mod format; // Binary on-disk format (log header, record frames)
pub mod policy; // Timestamp assignment state machine
pub mod reader; // Session log readback
pub mod writer; // Buffered, thread-safe session writer

// === Re-exports ===
pub use buffer::RecordBuffer;
pub use channel::LogChannel;
pub use codec::{CodecError, IdentityCodec, LogCodec};
pub use config::RecorderConfig;
pub use error::{RecorderError, Result};
pub use format::{
    FrameError, LogHeader, RecordFrame, FRAME_FORMAT_VERSION, LOG_FORMAT_VERSION, LOG_HEADER_SIZE,
    LOG_MAGIC, MAX_FRAME_SIZE, MIN_FRAME_LENGTH,
};
pub use policy::TimestampPolicy;
pub use reader::LogReader;
pub use writer::SessionWriter;
