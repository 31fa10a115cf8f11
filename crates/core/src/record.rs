//! Session record model and the record kind registry
//!
//! A [`Record`] is one unit of a recording: which device produced it, when
//! it was accepted, and a typed payload. Record kinds are organized by byte
//! ranges so the format can grow without renumbering:
//!
//! | Range | Category | Description |
//! |-------|----------|-------------|
//! | 0x00-0x0F | Reserved | Held back for framing control |
//! | 0x10-0x1F | Signal | Sampled device output (data, artifacts, DSP) |
//! | 0x20-0x2F | Annotation | Caller-supplied timeline markers |
//! | 0x30-0x3F | Device metadata | Configuration and version snapshots |
//! | 0x40-0xFF | Future | Reserved for future record families |
//!
//! Payload bytes inside a persisted frame are the bincode encoding of the
//! payload struct alone; the kind byte travels in the frame envelope, never
//! inside the payload.

use crate::error::{Error, Result};
use crate::packets::{
    AnnotationData, ArtifactPacket, ComputingDeviceConfiguration, DataPacket, DeviceConfiguration,
    DspData, VersionInfo,
};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Caller-assigned identifier of the device a record came from
///
/// Distinguishes multiple concurrently recorded devices within one log.
/// The value is opaque to the recorder: it is never validated, never
/// interpreted, and device 0 is as ordinary as any other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct DeviceId(i32);

impl DeviceId {
    /// Create a device id from its raw value
    #[inline]
    pub const fn new(raw: i32) -> Self {
        DeviceId(raw)
    }

    /// Get the raw value
    #[inline]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }
}

impl From<i32> for DeviceId {
    fn from(raw: i32) -> Self {
        DeviceId(raw)
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Broad category a record kind belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordCategory {
    /// Sampled device output
    Signal,
    /// Caller-supplied timeline markers
    Annotation,
    /// Configuration and version snapshots
    DeviceMeta,
}

impl RecordCategory {
    /// Get the kind byte range for this category
    pub fn kind_range(&self) -> (u8, u8) {
        match self {
            RecordCategory::Signal => (0x10, 0x1F),
            RecordCategory::Annotation => (0x20, 0x2F),
            RecordCategory::DeviceMeta => (0x30, 0x3F),
        }
    }
}

/// Record kinds with explicit byte values
///
/// The byte value is what a persisted frame carries; values never change
/// once allocated.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    // ========================================================================
    // Signal (0x10-0x1F)
    // ========================================================================
    /// Multichannel sample from a device signal
    Data = 0x10,

    /// Artifact detection flags
    Artifact = 0x11,

    /// DSP stage output
    Dsp = 0x12,

    // ========================================================================
    // Annotation (0x20-0x2F)
    // ========================================================================
    /// Free-form text marker
    AnnotationText = 0x20,

    /// Structured annotation with format and event identifiers
    Annotation = 0x21,

    // ========================================================================
    // Device metadata (0x30-0x3F)
    // ========================================================================
    /// Device configuration snapshot
    Configuration = 0x30,

    /// Device firmware/hardware versions
    Version = 0x31,

    /// Host machine description
    ComputingDevice = 0x32,
}

impl RecordKind {
    /// All kinds in the registry, in byte order
    pub const ALL: [RecordKind; 8] = [
        RecordKind::Data,
        RecordKind::Artifact,
        RecordKind::Dsp,
        RecordKind::AnnotationText,
        RecordKind::Annotation,
        RecordKind::Configuration,
        RecordKind::Version,
        RecordKind::ComputingDevice,
    ];

    /// Check if this kind carries sampled device output
    pub fn is_signal(&self) -> bool {
        matches!(
            self,
            RecordKind::Data | RecordKind::Artifact | RecordKind::Dsp
        )
    }

    /// Check if this kind is a caller-supplied annotation
    pub fn is_annotation(&self) -> bool {
        matches!(self, RecordKind::AnnotationText | RecordKind::Annotation)
    }

    /// Get the category this kind belongs to
    pub fn category(&self) -> RecordCategory {
        match *self as u8 {
            0x10..=0x1F => RecordCategory::Signal,
            0x20..=0x2F => RecordCategory::Annotation,
            _ => RecordCategory::DeviceMeta,
        }
    }

    /// Get the category name for a given byte value
    pub fn range_name(value: u8) -> &'static str {
        match value {
            0x00..=0x0F => "Reserved (framing control)",
            0x10..=0x1F => "Signal",
            0x20..=0x2F => "Annotation",
            0x30..=0x3F => "Device metadata",
            _ => "Future (reserved)",
        }
    }

    /// Human-readable description of this kind
    pub fn description(&self) -> &'static str {
        match self {
            RecordKind::Data => "Signal sample",
            RecordKind::Artifact => "Artifact flags",
            RecordKind::Dsp => "DSP output",
            RecordKind::AnnotationText => "Text annotation",
            RecordKind::Annotation => "Structured annotation",
            RecordKind::Configuration => "Device configuration",
            RecordKind::Version => "Device versions",
            RecordKind::ComputingDevice => "Host description",
        }
    }
}

impl TryFrom<u8> for RecordKind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x10 => Ok(RecordKind::Data),
            0x11 => Ok(RecordKind::Artifact),
            0x12 => Ok(RecordKind::Dsp),
            0x20 => Ok(RecordKind::AnnotationText),
            0x21 => Ok(RecordKind::Annotation),
            0x30 => Ok(RecordKind::Configuration),
            0x31 => Ok(RecordKind::Version),
            0x32 => Ok(RecordKind::ComputingDevice),
            _ => Err(Error::UnknownRecordKind(value)),
        }
    }
}

impl From<RecordKind> for u8 {
    fn from(kind: RecordKind) -> Self {
        kind as u8
    }
}

/// Typed payload of a record
///
/// One variant per entry in the kind registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Multichannel signal sample
    Data(DataPacket),
    /// Artifact detection flags
    Artifact(ArtifactPacket),
    /// DSP stage output
    Dsp(DspData),
    /// Free-form text marker
    AnnotationText(String),
    /// Structured annotation
    Annotation(AnnotationData),
    /// Device configuration snapshot
    Configuration(DeviceConfiguration),
    /// Device firmware/hardware versions
    Version(VersionInfo),
    /// Host machine description
    ComputingDevice(ComputingDeviceConfiguration),
}

impl Payload {
    /// Get the registry kind of this payload
    pub fn kind(&self) -> RecordKind {
        match self {
            Payload::Data(_) => RecordKind::Data,
            Payload::Artifact(_) => RecordKind::Artifact,
            Payload::Dsp(_) => RecordKind::Dsp,
            Payload::AnnotationText(_) => RecordKind::AnnotationText,
            Payload::Annotation(_) => RecordKind::Annotation,
            Payload::Configuration(_) => RecordKind::Configuration,
            Payload::Version(_) => RecordKind::Version,
            Payload::ComputingDevice(_) => RecordKind::ComputingDevice,
        }
    }

    /// Encode the payload body to its binary form
    ///
    /// The kind is not part of the output; frames carry it in the envelope.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            Payload::Data(p) => bincode::serialize(p)?,
            Payload::Artifact(p) => bincode::serialize(p)?,
            Payload::Dsp(p) => bincode::serialize(p)?,
            Payload::AnnotationText(s) => bincode::serialize(s)?,
            Payload::Annotation(a) => bincode::serialize(a)?,
            Payload::Configuration(c) => bincode::serialize(c)?,
            Payload::Version(v) => bincode::serialize(v)?,
            Payload::ComputingDevice(c) => bincode::serialize(c)?,
        };
        Ok(bytes)
    }

    /// Decode a payload body under the given kind
    pub fn decode(kind: RecordKind, bytes: &[u8]) -> Result<Self> {
        let payload = match kind {
            RecordKind::Data => Payload::Data(bincode::deserialize(bytes)?),
            RecordKind::Artifact => Payload::Artifact(bincode::deserialize(bytes)?),
            RecordKind::Dsp => Payload::Dsp(bincode::deserialize(bytes)?),
            RecordKind::AnnotationText => Payload::AnnotationText(bincode::deserialize(bytes)?),
            RecordKind::Annotation => Payload::Annotation(bincode::deserialize(bytes)?),
            RecordKind::Configuration => Payload::Configuration(bincode::deserialize(bytes)?),
            RecordKind::Version => Payload::Version(bincode::deserialize(bytes)?),
            RecordKind::ComputingDevice => Payload::ComputingDevice(bincode::deserialize(bytes)?),
        };
        Ok(payload)
    }
}

/// One unit of a recording
///
/// Carries the producing device, the moment the record was accepted, and
/// the typed payload. Records are immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Device that produced the payload
    pub device_id: DeviceId,
    /// Moment the record was accepted, per the writer's timestamp policy
    pub timestamp: Timestamp,
    /// Typed payload
    pub payload: Payload,
}

impl Record {
    /// Create a record
    pub fn new(device_id: DeviceId, timestamp: Timestamp, payload: Payload) -> Self {
        Record {
            device_id,
            timestamp,
            payload,
        }
    }

    /// Get the registry kind of this record
    pub fn kind(&self) -> RecordKind {
        self.payload.kind()
    }
}
