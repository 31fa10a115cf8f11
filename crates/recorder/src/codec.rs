//! Log codec trait definitions.

/// Log codec trait.
///
/// Every frame's bytes pass through the codec on their way to and from a
/// log file. This is the seam for compression or encryption-at-rest; the
/// frame format itself stays codec-agnostic.
///
/// # Thread Safety
///
/// Codecs must be `Send + Sync` so the writer can be shared across
/// threads.
pub trait LogCodec: Send + Sync {
    /// Encode frame bytes for storage.
    ///
    /// The returned bytes are what gets appended to the log.
    /// For [`IdentityCodec`], this is a copy with no transformation.
    fn encode(&self, data: &[u8]) -> Vec<u8>;

    /// Decode frame bytes from storage.
    ///
    /// Reverses the encode operation. Returns an error if the data
    /// cannot be decoded (e.g., decryption failure, corruption).
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Unique codec identifier.
    ///
    /// Lets replay tooling verify it is reading a log with the codec
    /// that wrote it.
    fn codec_id(&self) -> &str;
}

/// Codec errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Decoding failed (e.g., decryption failure, invalid format).
    ///
    /// Carries the codec identity and data length so callers can
    /// distinguish a wrong-codec error from data corruption.
    #[error("Decode error (codec={codec_id}, data_len={data_len}): {detail}")]
    DecodeError {
        /// Human-readable error description
        detail: String,
        /// Codec ID that attempted the decode
        codec_id: String,
        /// Length of the data that failed to decode
        data_len: usize,
    },

    /// Unknown codec identifier.
    #[error("Unknown codec: {0}")]
    UnknownCodec(String),
}

impl CodecError {
    /// Create a decode error with full diagnostic context.
    pub fn decode(detail: impl Into<String>, codec_id: impl Into<String>, data_len: usize) -> Self {
        CodecError::DecodeError {
            detail: detail.into(),
            codec_id: codec_id.into(),
            data_len,
        }
    }
}

/// Pass-through codec.
///
/// The only codec shipped with the recorder; frame bytes hit the log
/// unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCodec;

impl LogCodec for IdentityCodec {
    fn encode(&self, data: &[u8]) -> Vec<u8> {
        data.to_vec()
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(data.to_vec())
    }

    fn codec_id(&self) -> &str {
        "identity"
    }
}
