//! Session writer with buffered, thread-safe record intake.
//!
//! This module implements the recording surface:
//!
//! ## Record Lifecycle
//!
//! 1. `add_*()` - Stamps a record and appends it to the in-memory buffer
//! 2. `flush()` - Drains the buffer to the session log in one batch
//! 3. Or `discard_buffered_packets()` - Drops the buffer without persisting
//!
//! ## Buffering Contract
//!
//! - Records are **not on disk** until `flush()` returns successfully
//! - A failed flush keeps every record buffered; nothing is dropped
//! - Buffer growth is unbounded; callers watch `buffered_message_count()`
//!   and `buffered_message_size()` and flush on their own schedule
//! - Dropping the writer closes the log without flushing
//!
//! ## Timestamp Modes
//!
//! - `Legacy`: every record is stamped with the session clock's current time
//! - `Explicit`: records carry the last value passed to `set_timestamp`

use crate::buffer::RecordBuffer;
use crate::channel::LogChannel;
use crate::codec::{IdentityCodec, LogCodec};
use crate::config::RecorderConfig;
use crate::error::Result;
use crate::format::RecordFrame;
use crate::policy::TimestampPolicy;
use biotape_core::{
    AnnotationData, ArtifactPacket, Clock, ComputingDeviceConfiguration, DataPacket,
    DeviceConfiguration, DeviceId, DspData, Payload, Record, SystemClock, Timestamp,
    TimestampMode, VersionInfo,
};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};
use uuid::Uuid;

/// JSON body of the annotation written at the head of every session.
#[derive(serde::Serialize)]
struct StartupInfo<'a> {
    app_name: &'a str,
    app_version: &'a str,
    recorder_version: &'a str,
    recorded_at: String,
}

/// State behind the writer's lock.
struct WriterInner {
    buffer: RecordBuffer,
    policy: TimestampPolicy,
    channel: LogChannel,
}

/// Buffered writer for a biosignal session log.
///
/// Every operation takes `&self` and is safe to call from any thread
/// concurrently with any other; a single internal lock makes the visible
/// sequence of operations linearizable. An append racing a flush lands
/// entirely before the drain or entirely after it, never split.
///
/// Construction opens the target file (creating it if absent, appending if it
/// already holds a session log) and buffers one annotation identifying the
/// recording application, so a fresh writer always reports one buffered
/// record.
///
/// # Example
///
/// ```ignore
/// use biotape_recorder::SessionWriter;
/// use biotape_core::{DataPacket, DeviceId, SignalKind};
///
/// let writer = SessionWriter::create("session.btl")?;
/// writer.add_data_packet(
///     DeviceId::new(1),
///     Some(DataPacket::new(SignalKind::Eeg, vec![812.4, 809.1, 811.7, 810.0])),
/// )?;
/// writer.flush()?;
/// writer.close()?;
/// ```
pub struct SessionWriter {
    inner: Mutex<WriterInner>,
}

impl SessionWriter {
    /// Create a writer with defaults: empty application identity, the system
    /// clock, and the identity codec.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(
            path,
            RecorderConfig::default(),
            Box::new(IdentityCodec),
            Arc::new(SystemClock),
        )
    }

    /// Create a writer with the given application identity.
    pub fn with_config<P: AsRef<Path>>(path: P, config: RecorderConfig) -> Result<Self> {
        Self::new(path, config, Box::new(IdentityCodec), Arc::new(SystemClock))
    }

    /// Create a writer with full control over the codec and clock seams.
    ///
    /// Opens the log at `path` and buffers the startup annotation. Fails if
    /// the target cannot be opened or does not hold a valid session log.
    pub fn new<P: AsRef<Path>>(
        path: P,
        config: RecorderConfig,
        codec: Box<dyn LogCodec>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let mut channel = LogChannel::new(path.as_ref().to_path_buf(), codec);
        channel.open()?;

        let policy = TimestampPolicy::new(clock);
        let mut buffer = RecordBuffer::new();

        let annotation = Self::startup_annotation(&config)?;
        let record = Record::new(
            DeviceId::new(0),
            policy.next(),
            Payload::Annotation(annotation),
        );
        buffer.append(RecordFrame::from_record(&record)?);

        Ok(SessionWriter {
            inner: Mutex::new(WriterInner {
                buffer,
                policy,
                channel,
            }),
        })
    }

    /// Build the annotation identifying who produced this session.
    ///
    /// Application fields fall back to empty strings when the caller never
    /// supplied them.
    fn startup_annotation(config: &RecorderConfig) -> Result<AnnotationData> {
        let info = StartupInfo {
            app_name: &config.app_name,
            app_version: &config.app_version,
            recorder_version: env!("CARGO_PKG_VERSION"),
            recorded_at: chrono::Utc::now().to_rfc3339(),
        };
        let data = serde_json::to_string(&info)
            .map_err(|e| biotape_core::Error::SerializationError(e.to_string()))?;
        Ok(AnnotationData::json(data))
    }

    /// Reopen the underlying log after a `close`.
    ///
    /// Idempotent when already open. Buffered records survive across a
    /// close/open cycle.
    pub fn open(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.channel.open()
    }

    /// Close the underlying log.
    ///
    /// Buffered records are not flushed; they stay pending and can still be
    /// persisted by reopening and flushing, or dropped via
    /// [`discard_buffered_packets`](Self::discard_buffered_packets).
    /// Idempotent when already closed.
    pub fn close(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.channel.close()
    }

    /// Persist all buffered records to the log in insertion order.
    ///
    /// The drain and the write happen under one lock acquisition, so records
    /// added concurrently with a flush are either fully included or left for
    /// the next one. On failure every drained record is restored to the
    /// buffer unchanged and in order; nothing is silently dropped.
    pub fn flush(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.buffer.is_empty() {
            return Ok(());
        }

        let batch = inner.buffer.drain();
        match inner.channel.write_batch(&batch) {
            Ok(()) => {
                debug!(frames = batch.len(), "Flushed buffered records");
                Ok(())
            }
            Err(e) => {
                for frame in batch {
                    inner.buffer.append(frame);
                }
                Err(e)
            }
        }
    }

    /// Drop all buffered records without persisting them.
    pub fn discard_buffered_packets(&self) {
        let mut inner = self.inner.lock();
        let discarded = inner.buffer.len();
        inner.buffer.clear();
        debug!(discarded, "Discarded buffered records");
    }

    /// Number of records currently buffered.
    pub fn buffered_message_count(&self) -> usize {
        self.inner.lock().buffer.len()
    }

    /// Total byte size of currently buffered records, as framed for the log.
    pub fn buffered_message_size(&self) -> usize {
        self.inner.lock().buffer.byte_size()
    }

    /// Buffer an artifact packet.
    pub fn add_artifact_packet(&self, device_id: DeviceId, packet: ArtifactPacket) -> Result<()> {
        self.append_payload(device_id, Payload::Artifact(packet))
    }

    /// Buffer a signal data packet. `None` is a no-op.
    pub fn add_data_packet(&self, device_id: DeviceId, packet: Option<DataPacket>) -> Result<()> {
        let Some(packet) = packet else {
            return Ok(());
        };
        self.append_payload(device_id, Payload::Data(packet))
    }

    /// Buffer a plain text annotation. An empty string is a no-op.
    pub fn add_annotation_string(&self, device_id: DeviceId, annotation: &str) -> Result<()> {
        if annotation.is_empty() {
            return Ok(());
        }
        self.append_payload(device_id, Payload::AnnotationText(annotation.to_string()))
    }

    /// Buffer a structured annotation. Empty optional sub-fields are
    /// normalized to absent; an annotation with empty `data` is a no-op.
    pub fn add_annotation(&self, device_id: DeviceId, annotation: AnnotationData) -> Result<()> {
        if annotation.is_empty() {
            return Ok(());
        }
        self.append_payload(device_id, Payload::Annotation(annotation.normalized()))
    }

    /// Buffer a device configuration snapshot. `None` is a no-op.
    pub fn add_configuration(
        &self,
        device_id: DeviceId,
        config: Option<DeviceConfiguration>,
    ) -> Result<()> {
        let Some(config) = config else {
            return Ok(());
        };
        self.append_payload(device_id, Payload::Configuration(config))
    }

    /// Buffer a device version report. `None` is a no-op.
    pub fn add_version(&self, device_id: DeviceId, version: Option<VersionInfo>) -> Result<()> {
        let Some(version) = version else {
            return Ok(());
        };
        self.append_payload(device_id, Payload::Version(version))
    }

    /// Buffer the computing device configuration.
    pub fn add_computing_device_configuration(
        &self,
        device_id: DeviceId,
        config: ComputingDeviceConfiguration,
    ) -> Result<()> {
        self.append_payload(device_id, Payload::ComputingDevice(config))
    }

    /// Buffer a DSP result packet.
    pub fn add_dsp(&self, device_id: DeviceId, dsp: DspData) -> Result<()> {
        self.append_payload(device_id, Payload::Dsp(dsp))
    }

    /// Switch how subsequent records are timestamped.
    pub fn set_timestamp_mode(&self, mode: TimestampMode) {
        let mut inner = self.inner.lock();
        inner.policy.set_mode(mode);
    }

    /// Set the timestamp stamped onto subsequent records.
    ///
    /// Applies to the next record and every one after it until changed
    /// again. Only valid in [`TimestampMode::Explicit`]: calling this in any
    /// other mode panics in debug builds and is silently ignored in release
    /// builds.
    pub fn set_timestamp(&self, timestamp: Timestamp) {
        let mut inner = self.inner.lock();
        inner.policy.set_explicit(timestamp);
    }

    /// Current timestamp mode.
    pub fn timestamp_mode(&self) -> TimestampMode {
        self.inner.lock().policy.mode()
    }

    /// Path of the session log this writer records to.
    pub fn path(&self) -> PathBuf {
        self.inner.lock().channel.path().to_path_buf()
    }

    /// Session identifier from the log header.
    pub fn session_id(&self) -> Option<Uuid> {
        self.inner.lock().channel.session_id()
    }

    /// Stamp, frame, and buffer one record.
    fn append_payload(&self, device_id: DeviceId, payload: Payload) -> Result<()> {
        let mut inner = self.inner.lock();
        let record = Record::new(device_id, inner.policy.next(), payload);
        let frame = RecordFrame::from_record(&record)?;
        trace!(
            kind = ?record.kind(),
            device_id = %record.device_id,
            timestamp = %record.timestamp,
            "Record buffered"
        );
        inner.buffer.append(frame);
        Ok(())
    }
}

impl Drop for SessionWriter {
    fn drop(&mut self) {
        let mut inner = self.inner.lock();
        if !inner.buffer.is_empty() {
            debug!(
                discarded = inner.buffer.len(),
                "Writer dropped with unflushed records"
            );
        }
        let _ = inner.channel.close();
    }
}

impl std::fmt::Debug for SessionWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("SessionWriter")
            .field("path", &inner.channel.path())
            .field("open", &inner.channel.is_open())
            .field("buffered", &inner.buffer.len())
            .finish()
    }
}
