//! Recorder configuration.
//!
//! This module provides configuration for session recording.

/// Recorder configuration parameters.
///
/// The application fields identify who produced a recording. They are
/// written into the startup annotation at the head of every session so a
/// log file stays attributable after it leaves the machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecorderConfig {
    /// Name of the recording application (default: empty).
    pub app_name: String,

    /// Version of the recording application (default: empty).
    pub app_version: String,
}

impl RecorderConfig {
    /// Create a new recorder configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application name (builder pattern).
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Set the application version (builder pattern).
    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = version.into();
        self
    }

    /// Create a configuration with fixed fields for testing.
    pub fn for_testing() -> Self {
        RecorderConfig {
            app_name: "biotape-tests".to_string(),
            app_version: "0.0.0".to_string(),
        }
    }
}
