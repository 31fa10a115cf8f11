//! Session log reader for verification and replay.
//!
//! The reader walks a persisted log front to back and hands frames (or
//! decoded records) to replay tooling in the order they were written.

use crate::codec::{IdentityCodec, LogCodec};
use crate::error::{RecorderError, Result};
use crate::format::{FrameError, LogHeader, RecordFrame, LOG_FORMAT_VERSION, LOG_HEADER_SIZE};
use biotape_core::Record;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// Reader for a persisted session log.
///
/// Opening validates the header; frames are then read in write order. A
/// partial frame at the tail (interrupted final write) ends iteration
/// cleanly, while a checksum mismatch inside the stream is a corruption
/// error.
pub struct LogReader {
    /// Log file path
    path: PathBuf,

    /// Validated header from the front of the file
    header: LogHeader,

    /// Codec the log was written with.
    ///
    /// Currently the codec is stored for future use when codec-aware
    /// decoding is implemented. The identity codec passes through unchanged.
    #[allow(dead_code)]
    codec: Box<dyn LogCodec>,
}

impl LogReader {
    /// Open a session log written with the identity codec.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_codec(path, Box::new(IdentityCodec))
    }

    /// Open a session log, naming the codec it was written with.
    pub fn open_with_codec<P: AsRef<Path>>(path: P, codec: Box<dyn LogCodec>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = std::fs::read(&path)?;

        if data.len() < LOG_HEADER_SIZE {
            return Err(RecorderError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Truncated log header",
            )));
        }

        let header_bytes: [u8; LOG_HEADER_SIZE] = data[..LOG_HEADER_SIZE]
            .try_into()
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidData, "Short header"))?;
        let header = LogHeader::from_bytes(&header_bytes).ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, "Invalid log header")
        })?;

        if !header.is_valid() {
            return Err(RecorderError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Invalid log magic bytes",
            )));
        }

        if header.format_version != LOG_FORMAT_VERSION {
            return Err(RecorderError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Unsupported log format version {}", header.format_version),
            )));
        }

        Ok(LogReader {
            path,
            header,
            codec,
        })
    }

    /// Session identifier from the log header.
    pub fn session_id(&self) -> Uuid {
        self.header.session_id
    }

    /// Format version from the log header.
    pub fn format_version(&self) -> u32 {
        self.header.format_version
    }

    /// Log file path this reader is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all frames in write order.
    ///
    /// Stops cleanly at a partial frame left by an interrupted final write;
    /// everything before it is returned. A checksum mismatch or malformed
    /// frame inside the stream is returned as an error.
    pub fn read_frames(&self) -> Result<Vec<RecordFrame>> {
        let data = std::fs::read(&self.path)?;
        let mut frames = Vec::new();
        let mut offset = LOG_HEADER_SIZE;

        while offset < data.len() {
            match RecordFrame::from_bytes(&data[offset..], offset as u64) {
                Ok((frame, consumed)) => {
                    frames.push(frame);
                    offset += consumed;
                }
                Err(FrameError::InsufficientData) => {
                    warn!(
                        path = %self.path.display(),
                        offset,
                        trailing = data.len() - offset,
                        "Partial frame at end of log"
                    );
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(frames)
    }

    /// Read all frames and decode each into its record.
    pub fn read_records(&self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        for frame in self.read_frames()? {
            records.push(frame.decode_record()?);
        }
        Ok(records)
    }
}

impl std::fmt::Debug for LogReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogReader")
            .field("path", &self.path)
            .field("session_id", &self.header.session_id)
            .finish()
    }
}
