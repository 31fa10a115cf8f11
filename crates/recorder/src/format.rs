//! Session log file and frame format.
//!
//! A session log is a single append-only file: a fixed header followed by
//! self-delimiting frames, one per record, in the order the writer accepted
//! them.
//!
//! # Log Layout
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │ Log Header (24 bytes)              │
//! ├────────────────────────────────────┤
//! │ Frame 1                            │
//! ├────────────────────────────────────┤
//! │ Frame 2                            │
//! ├────────────────────────────────────┤
//! │ ...                                │
//! └────────────────────────────────────┘
//! ```
//!
//! # Frame Layout
//!
//! ```text
//! ┌────────────┬──────────┬─────────────┬──────────────┬────────────────┬──────────┐
//! │ Length (4) │ Kind (1) │ Version (1) │ DeviceId (4) │ Timestamp (8)  │ ...      │
//! └────────────┴──────────┴─────────────┴──────────────┴────────────────┴──────────┘
//!                                                         Payload (variable) CRC32 (4)
//! ```
//!
//! The length field counts everything after itself. CRC32 covers kind
//! through payload. Payload bytes are the bincode encoding of the record's
//! payload struct.

use biotape_core::{DeviceId, Payload, Record, RecordKind, Timestamp};
use crc32fast::Hasher;
use uuid::Uuid;

/// Magic bytes identifying a session log file: "BTAP"
pub const LOG_MAGIC: [u8; 4] = *b"BTAP";

/// Current log format version
pub const LOG_FORMAT_VERSION: u32 = 1;

/// Size of the log header in bytes
pub const LOG_HEADER_SIZE: usize = 24;

/// Current frame format version
pub const FRAME_FORMAT_VERSION: u8 = 1;

/// Maximum frame size (16 MB)
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Minimum value of a frame's length field:
/// kind(1) + version(1) + device_id(4) + timestamp(8) + crc(4)
pub const MIN_FRAME_LENGTH: usize = 1 + 1 + 4 + 8 + 4;

/// Session log header (24 bytes).
///
/// Written once when a log file is created. Appending sessions validate it
/// and keep it unchanged, so the session id identifies the file for its
/// whole life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogHeader {
    /// Magic bytes: "BTAP"
    pub magic: [u8; 4],

    /// Format version for forward compatibility
    pub format_version: u32,

    /// Random identifier assigned when the file was created
    pub session_id: Uuid,
}

impl LogHeader {
    /// Create a header for a fresh log file.
    pub fn new(session_id: Uuid) -> Self {
        LogHeader {
            magic: LOG_MAGIC,
            format_version: LOG_FORMAT_VERSION,
            session_id,
        }
    }

    /// Serialize header to bytes.
    pub fn to_bytes(&self) -> [u8; LOG_HEADER_SIZE] {
        let mut bytes = [0u8; LOG_HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.format_version.to_le_bytes());
        bytes[8..24].copy_from_slice(self.session_id.as_bytes());
        bytes
    }

    /// Deserialize header from bytes.
    pub fn from_bytes(bytes: &[u8; LOG_HEADER_SIZE]) -> Option<Self> {
        Some(LogHeader {
            magic: bytes[0..4].try_into().ok()?,
            format_version: u32::from_le_bytes(bytes[4..8].try_into().ok()?),
            session_id: Uuid::from_bytes(bytes[8..24].try_into().ok()?),
        })
    }

    /// Validate the header has correct magic bytes.
    pub fn is_valid(&self) -> bool {
        self.magic == LOG_MAGIC
    }
}

/// Frame parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// Not enough data to parse a complete frame
    #[error("Insufficient data to parse frame")]
    InsufficientData,

    /// Length field is below the minimum a frame can occupy
    #[error("Invalid frame format")]
    InvalidFormat,

    /// Frame exceeds the maximum allowed size
    #[error("Frame too large: {size} bytes (max: {max})")]
    TooLarge {
        /// Actual size
        size: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// CRC32 checksum mismatch (corruption detected)
    #[error("Checksum mismatch at offset {offset}: expected {expected:08x}, computed {computed:08x}")]
    ChecksumMismatch {
        /// File offset where corruption was detected
        offset: u64,
        /// Checksum stored in the frame
        expected: u32,
        /// Checksum computed over the frame content
        computed: u32,
    },

    /// Kind byte not in the record kind registry
    #[error("Unknown record kind: 0x{0:02x}")]
    UnknownKind(u8),

    /// Unsupported frame format version
    #[error("Unsupported frame version: {0}")]
    UnsupportedVersion(u8),
}

/// One record in its on-disk form.
///
/// The payload is pre-encoded at construction so the frame's byte size is
/// known without re-encoding; the buffer's size accounting relies on that.
/// Frames are immutable once written.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFrame {
    /// Record kind from the registry
    pub kind: RecordKind,

    /// Frame format version
    pub version: u8,

    /// Device the record came from
    pub device_id: DeviceId,

    /// Timestamp assigned when the record was accepted
    pub timestamp: Timestamp,

    /// Encoded payload body
    pub payload: Vec<u8>,
}

impl RecordFrame {
    /// Create a frame from already encoded payload bytes.
    pub fn new(
        kind: RecordKind,
        device_id: DeviceId,
        timestamp: Timestamp,
        payload: Vec<u8>,
    ) -> Self {
        RecordFrame {
            kind,
            version: FRAME_FORMAT_VERSION,
            device_id,
            timestamp,
            payload,
        }
    }

    /// Frame a record, encoding its payload.
    pub fn from_record(record: &Record) -> biotape_core::Result<Self> {
        Ok(RecordFrame::new(
            record.kind(),
            record.device_id,
            record.timestamp,
            record.payload.encode()?,
        ))
    }

    /// Decode the framed payload back into a record.
    pub fn decode_record(&self) -> biotape_core::Result<Record> {
        Ok(Record::new(
            self.device_id,
            self.timestamp,
            Payload::decode(self.kind, &self.payload)?,
        ))
    }

    /// Serialize frame to bytes (for appending to a log).
    ///
    /// Format: length (4) + kind (1) + version (1) + device_id (4) +
    /// timestamp (8) + payload + crc32 (4). CRC32 covers kind through
    /// payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>, FrameError> {
        let mut content = Vec::with_capacity(14 + self.payload.len());
        content.push(self.kind as u8);
        content.push(self.version);
        content.extend_from_slice(&self.device_id.as_i32().to_le_bytes());
        content.extend_from_slice(&self.timestamp.as_micros().to_le_bytes());
        content.extend_from_slice(&self.payload);

        let mut hasher = Hasher::new();
        hasher.update(&content);
        let crc = hasher.finalize();

        let total_len = content.len() + 4;
        if total_len > MAX_FRAME_SIZE {
            return Err(FrameError::TooLarge {
                size: total_len,
                max: MAX_FRAME_SIZE,
            });
        }

        let mut buf = Vec::with_capacity(4 + total_len);
        buf.extend_from_slice(&(total_len as u32).to_le_bytes());
        buf.extend_from_slice(&content);
        buf.extend_from_slice(&crc.to_le_bytes());

        Ok(buf)
    }

    /// Deserialize a frame from bytes.
    ///
    /// `offset` is the file offset of the frame start, used in corruption
    /// reports. Returns the frame and the bytes consumed.
    pub fn from_bytes(data: &[u8], offset: u64) -> Result<(Self, usize), FrameError> {
        if data.len() < 4 {
            return Err(FrameError::InsufficientData);
        }

        let length = u32::from_le_bytes(data[0..4].try_into().unwrap()) as usize;

        if length < MIN_FRAME_LENGTH {
            return Err(FrameError::InvalidFormat);
        }
        if length > MAX_FRAME_SIZE {
            return Err(FrameError::TooLarge {
                size: length,
                max: MAX_FRAME_SIZE,
            });
        }
        if data.len() < 4 + length {
            return Err(FrameError::InsufficientData);
        }

        let content = &data[4..4 + length - 4];
        let stored_crc = u32::from_le_bytes(data[4 + length - 4..4 + length].try_into().unwrap());

        let mut hasher = Hasher::new();
        hasher.update(content);
        let computed_crc = hasher.finalize();

        if stored_crc != computed_crc {
            return Err(FrameError::ChecksumMismatch {
                offset,
                expected: stored_crc,
                computed: computed_crc,
            });
        }

        let kind =
            RecordKind::try_from(content[0]).map_err(|_| FrameError::UnknownKind(content[0]))?;
        let version = content[1];
        if version != FRAME_FORMAT_VERSION {
            return Err(FrameError::UnsupportedVersion(version));
        }

        let device_id = DeviceId::new(i32::from_le_bytes(content[2..6].try_into().unwrap()));
        let timestamp =
            Timestamp::from_micros(i64::from_le_bytes(content[6..14].try_into().unwrap()));
        let payload = content[14..].to_vec();

        Ok((
            RecordFrame {
                kind,
                version,
                device_id,
                timestamp,
                payload,
            },
            4 + length,
        ))
    }

    /// Byte size this frame occupies once serialized.
    pub fn encoded_len(&self) -> usize {
        // length(4) + kind(1) + version(1) + device_id(4) + timestamp(8) + payload + crc(4)
        4 + 1 + 1 + 4 + 8 + self.payload.len() + 4
    }
}
