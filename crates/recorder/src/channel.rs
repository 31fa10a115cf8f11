//! Append-only file channel for session logs.
//!
//! The channel owns the log file handle and the open/closed lifecycle.
//! Opening never truncates: a fresh file gets a header, an existing file is
//! validated and extended. All writes go to the end of the file.

use crate::codec::LogCodec;
use crate::error::{RecorderError, Result};
use crate::format::{LogHeader, RecordFrame, LOG_HEADER_SIZE};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};
use uuid::Uuid;

/// Append-only output target for framed records.
///
/// Closed until [`open`](LogChannel::open) is called, and again after
/// [`close`](LogChannel::close); both are idempotent. Writing on a closed
/// channel fails with [`RecorderError::ChannelClosed`] without touching the
/// file.
pub struct LogChannel {
    /// Log file path
    path: PathBuf,

    /// Codec applied to every frame's bytes
    codec: Box<dyn LogCodec>,

    /// Buffered file handle (None when closed)
    writer: Option<BufWriter<File>>,

    /// Session identifier from the log header, known once opened
    session_id: Option<Uuid>,

    /// Current end-of-file position in bytes
    position: u64,
}

impl LogChannel {
    /// Create a channel bound to `path` without touching the filesystem.
    pub fn new(path: PathBuf, codec: Box<dyn LogCodec>) -> Self {
        LogChannel {
            path,
            codec,
            writer: None,
            session_id: None,
            position: 0,
        }
    }

    /// Open the log file for appending.
    ///
    /// Creates the file and writes a fresh header if it does not exist or
    /// is empty; otherwise validates the existing header and positions at
    /// end-of-file. Existing content is never overwritten. Idempotent when
    /// already open.
    pub fn open(&mut self) -> Result<()> {
        if self.writer.is_some() {
            debug!(path = %self.path.display(), "Channel already open");
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        let len = file.metadata()?.len();

        if len == 0 {
            let header = LogHeader::new(Uuid::new_v4());
            file.write_all(&header.to_bytes())?;
            self.session_id = Some(header.session_id);
            self.position = LOG_HEADER_SIZE as u64;
        } else {
            if len < LOG_HEADER_SIZE as u64 {
                return Err(RecorderError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Truncated log header",
                )));
            }

            let mut header_bytes = [0u8; LOG_HEADER_SIZE];
            file.read_exact(&mut header_bytes)?;

            let header = LogHeader::from_bytes(&header_bytes).ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidData, "Invalid log header")
            })?;

            if !header.is_valid() {
                return Err(RecorderError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Invalid log magic bytes",
                )));
            }

            if header.format_version != crate::format::LOG_FORMAT_VERSION {
                return Err(RecorderError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Unsupported log format version {}", header.format_version),
                )));
            }

            self.session_id = Some(header.session_id);
            self.position = len;
        }

        self.writer = Some(BufWriter::new(file));
        info!(path = %self.path.display(), position = self.position, "Opened session log");
        Ok(())
    }

    /// Flush buffered bytes, best-effort sync, and release the handle.
    ///
    /// Idempotent when already closed.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            writer.get_ref().sync_all()?;
            info!(path = %self.path.display(), position = self.position, "Closed session log");
        }
        Ok(())
    }

    /// Append the given frames in order and flush to the OS.
    ///
    /// Each frame's bytes pass through the codec before hitting the file.
    /// Fails without writing anything if the channel is closed.
    pub fn write_batch(&mut self, frames: &[RecordFrame]) -> Result<()> {
        let writer = self.writer.as_mut().ok_or(RecorderError::ChannelClosed)?;

        let mut written = 0u64;
        for frame in frames {
            let bytes = frame.to_bytes()?;
            let encoded = self.codec.encode(&bytes);
            writer.write_all(&encoded)?;
            written += encoded.len() as u64;
            trace!(kind = ?frame.kind, size = encoded.len(), "Frame written");
        }
        writer.flush()?;

        self.position += written;
        debug!(
            frames = frames.len(),
            bytes = written,
            position = self.position,
            "Batch appended"
        );
        Ok(())
    }

    /// Check if the channel currently holds an open handle.
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Log file path this channel is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Session identifier from the log header.
    ///
    /// `None` until the channel has been opened once.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    /// Current end-of-file position in bytes.
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl std::fmt::Debug for LogChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogChannel")
            .field("path", &self.path)
            .field("codec", &self.codec.codec_id())
            .field("open", &self.is_open())
            .field("position", &self.position)
            .finish()
    }
}
