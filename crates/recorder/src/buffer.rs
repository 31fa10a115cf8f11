//! In-memory holding area for frames pending persistence.

use crate::format::RecordFrame;

/// Ordered buffer of framed records with live accounting.
///
/// Insertion order is the persistence order. `len` and `byte_size` are
/// maintained incrementally and always equal the true count and the summed
/// serialized size of the held frames; callers use them to decide when to
/// flush.
///
/// The buffer is not synchronized. The writer serializes access behind its
/// lock, which is what makes drain and clear atomic with respect to
/// concurrent appends.
#[derive(Debug, Default)]
pub struct RecordBuffer {
    frames: Vec<RecordFrame>,
    byte_size: usize,
}

impl RecordBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        RecordBuffer {
            frames: Vec::new(),
            byte_size: 0,
        }
    }

    /// Add a frame at the tail.
    pub fn append(&mut self, frame: RecordFrame) {
        self.byte_size += frame.encoded_len();
        self.frames.push(frame);
    }

    /// Remove and return all held frames in insertion order.
    ///
    /// Counters reset to zero. Used by flush.
    pub fn drain(&mut self) -> Vec<RecordFrame> {
        self.byte_size = 0;
        std::mem::take(&mut self.frames)
    }

    /// Remove all held frames without returning them.
    ///
    /// Counters reset to zero. Used by discard.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.byte_size = 0;
    }

    /// Number of frames currently held.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Summed serialized size of the held frames, in bytes.
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }
}
