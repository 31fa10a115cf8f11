//! Core types for biotape
//!
//! This crate defines the record model shared by the recorder and by replay
//! tooling:
//! - Record: one unit of a recording (device, timestamp, typed payload)
//! - RecordKind: byte registry of record kinds
//! - DeviceId: caller-assigned device identifier
//! - Timestamp / TimestampMode / Clock: stamping types and the time seam
//! - Payload structs: ArtifactPacket, DataPacket, AnnotationData, ...
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod error;
pub mod packets;
pub mod record;
pub mod timestamp;

// Re-export commonly used types
pub use error::{Error, Result};
pub use packets::{
    AnnotationData, AnnotationFormat, ArtifactPacket, ComputingDeviceConfiguration, DataPacket,
    DeviceConfiguration, DspData, SignalKind, VersionInfo,
};
pub use record::{DeviceId, Payload, Record, RecordCategory, RecordKind};
pub use timestamp::{Clock, SystemClock, Timestamp, TimestampMode};
