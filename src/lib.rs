//! biotape - Buffered, thread-safe biosignal session recording
//!
//! biotape records heterogeneous telemetry from biosignal devices (EEG
//! samples, artifacts, annotations, device metadata, DSP results) into an
//! ordered, replayable binary session log. Records from any number of
//! threads are buffered in memory and persisted in one batch on `flush`.
//!
//! # Quick Start
//!
//! ```ignore
//! use biotape::{DataPacket, DeviceId, SessionWriter, SignalKind};
//!
//! // Open a session log (created if absent, appended to if present)
//! let writer = SessionWriter::create("session.btl")?;
//!
//! // Buffer a packet of EEG samples
//! let samples = DataPacket::new(SignalKind::Eeg, vec![812.4, 809.1, 811.7, 810.0]);
//! writer.add_data_packet(DeviceId::new(1), Some(samples))?;
//!
//! // Persist everything buffered so far, in order
//! writer.flush()?;
//! writer.close()?;
//! ```
//!
//! # Architecture
//!
//! The record model lives in `biotape-core`; buffering, timestamp policy,
//! the on-disk format, and the writer/reader pair live in
//! `biotape-recorder`. This crate re-exports the public API of both.

// Record model and shared types
pub use biotape_core::{
    AnnotationData, AnnotationFormat, ArtifactPacket, Clock, ComputingDeviceConfiguration,
    DataPacket, DeviceConfiguration, DeviceId, DspData, Error as CoreError, Payload, Record,
    RecordCategory, RecordKind, SignalKind, SystemClock, Timestamp, TimestampMode, VersionInfo,
};

// Recording surface
pub use biotape_recorder::{
    CodecError, FrameError, IdentityCodec, LogChannel, LogCodec, LogHeader, LogReader,
    RecordBuffer, RecordFrame, RecorderConfig, RecorderError, Result, SessionWriter,
    TimestampPolicy, FRAME_FORMAT_VERSION, LOG_FORMAT_VERSION, LOG_HEADER_SIZE, LOG_MAGIC,
    MAX_FRAME_SIZE, MIN_FRAME_LENGTH,
};
