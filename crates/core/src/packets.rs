//! Payload types for session records
//!
//! This module defines the concrete payload carried by each record kind.
//! None of these types are interpreted here: the recorder moves them from a
//! producer to a log verbatim, and replay tooling decides what they mean.
//!
//! All payloads serialize with serde; their binary form inside a log frame
//! is bincode.

use serde::{Deserialize, Serialize};

/// Artifact detection flags emitted alongside the signal stream
///
/// Artifacts mark stretches of signal that downstream consumers usually
/// exclude from analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPacket {
    /// Whether the headband was seated on the wearer
    pub headband_on: bool,
    /// Eye blink detected
    pub blink: bool,
    /// Jaw clench detected
    pub jaw_clench: bool,
}

/// Signal channel a [`DataPacket`] was sampled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// Raw EEG samples, one value per electrode
    Eeg,
    /// Driven-right-leg / reference voltages
    DrlRef,
    /// Accelerometer axes in g
    Accelerometer,
    /// Gyroscope axes in degrees per second
    Gyro,
    /// Battery telemetry (charge percent, voltage, temperature)
    Battery,
    /// Photoplethysmogram samples
    Ppg,
}

impl SignalKind {
    /// Signal name as it appears in rendered logs
    pub fn name(&self) -> &'static str {
        match self {
            SignalKind::Eeg => "eeg",
            SignalKind::DrlRef => "drl_ref",
            SignalKind::Accelerometer => "accelerometer",
            SignalKind::Gyro => "gyro",
            SignalKind::Battery => "battery",
            SignalKind::Ppg => "ppg",
        }
    }
}

/// One multichannel sample from a device signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPacket {
    /// Which signal the values belong to
    pub kind: SignalKind,
    /// Channel values in device channel order
    pub values: Vec<f64>,
}

impl DataPacket {
    /// Create a packet for a signal with the given channel values
    pub fn new(kind: SignalKind, values: Vec<f64>) -> Self {
        DataPacket { kind, values }
    }

    /// Number of channels in this sample
    pub fn channel_count(&self) -> usize {
        self.values.len()
    }
}

/// Encoding of an annotation's `data` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationFormat {
    /// Free-form text
    Plain,
    /// JSON document
    Json,
    /// OSC packet rendered to text
    Osc,
}

impl Default for AnnotationFormat {
    fn default() -> Self {
        AnnotationFormat::Plain
    }
}

/// Caller-supplied annotation attached to the session timeline
///
/// `data` is the annotation body and is the only required field. The three
/// identifier fields exist for tooling that threads annotations into event
/// hierarchies; when empty they are left out of the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationData {
    /// Annotation body; an empty body is not recordable
    pub data: String,
    /// How `data` is encoded
    pub format: AnnotationFormat,
    /// Event type label, if the annotation participates in an event scheme
    pub event_type: Option<String>,
    /// Event identifier within the scheme
    pub event_id: Option<String>,
    /// Identifier of the parent event, for nested events
    pub parent_id: Option<String>,
}

impl AnnotationData {
    /// Create a plain-text annotation with no event identifiers
    pub fn plain(data: impl Into<String>) -> Self {
        AnnotationData {
            data: data.into(),
            format: AnnotationFormat::Plain,
            event_type: None,
            event_id: None,
            parent_id: None,
        }
    }

    /// Create a JSON annotation with no event identifiers
    pub fn json(data: impl Into<String>) -> Self {
        AnnotationData {
            data: data.into(),
            format: AnnotationFormat::Json,
            event_type: None,
            event_id: None,
            parent_id: None,
        }
    }

    /// Whether the annotation body is empty
    ///
    /// Empty-bodied annotations are dropped by the writer rather than
    /// recorded.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Fold empty optional fields to `None`
    ///
    /// Callers coming from string-oriented bindings pass `Some("")` where
    /// they mean "absent"; normalizing keeps the serialized form free of
    /// empty markers.
    pub fn normalized(mut self) -> Self {
        if self.event_type.as_deref() == Some("") {
            self.event_type = None;
        }
        if self.event_id.as_deref() == Some("") {
            self.event_id = None;
        }
        if self.parent_id.as_deref() == Some("") {
            self.parent_id = None;
        }
        self
    }
}

/// Device-reported configuration snapshot
///
/// Captured when a headband connects or changes presets. Opaque to the
/// recorder; replay tooling interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfiguration {
    /// Advertised device name
    pub headband_name: String,
    /// Device serial number
    pub serial_number: String,
    /// Active preset identifier
    pub preset: String,
    /// Number of EEG channels in the active preset
    pub eeg_channel_count: u32,
    /// Sampling rate of the EEG stream in hertz
    pub sample_rate_hz: f64,
    /// Mains notch filter frequency, if one is active
    pub notch_filter_hz: Option<u32>,
}

/// Device-reported firmware and hardware versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Firmware version string
    pub firmware_version: String,
    /// Hardware revision string
    pub hardware_version: String,
    /// Bootloader version string
    pub bootloader_version: String,
    /// Wire protocol version number
    pub protocol_version: u32,
}

/// Description of the host machine that produced the recording
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputingDeviceConfiguration {
    /// Operating system family ("linux", "android", ...)
    pub platform: String,
    /// Operating system version string
    pub os_version: String,
    /// Hardware model identifier
    pub hardware_model: String,
}

/// Output of a device-side or host-side DSP stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DspData {
    /// Identifier of the DSP stage that produced the values
    pub dsp_type: String,
    /// Stage output values
    pub values: Vec<f64>,
}

impl DspData {
    /// Create a DSP output payload
    pub fn new(dsp_type: impl Into<String>, values: Vec<f64>) -> Self {
        DspData {
            dsp_type: dsp_type.into(),
            values,
        }
    }
}
