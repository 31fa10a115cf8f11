//! Timestamp assignment for buffered records.
//!
//! Records are stamped when they enter the buffer, not when they reach the
//! file, so a slow flush never skews signal timing. The policy decides where
//! the stamp comes from: the session clock, or a value the caller set.

use biotape_core::{Clock, Timestamp, TimestampMode};
use std::sync::Arc;
use tracing::warn;

/// Decides the timestamp stamped onto each buffered record.
///
/// In [`TimestampMode::Legacy`] every record is stamped with the clock's
/// current time. In [`TimestampMode::Explicit`] records carry the value most
/// recently passed to [`set_explicit`](TimestampPolicy::set_explicit), which
/// repeats until the caller moves it forward.
pub struct TimestampPolicy {
    mode: TimestampMode,
    explicit: Timestamp,
    clock: Arc<dyn Clock>,
}

impl TimestampPolicy {
    /// Create a policy in the default mode, stamping from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        TimestampPolicy {
            mode: TimestampMode::default(),
            explicit: Timestamp::EPOCH,
            clock,
        }
    }

    /// Current timestamp mode.
    pub fn mode(&self) -> TimestampMode {
        self.mode
    }

    /// Switch timestamp mode.
    ///
    /// The stored explicit value survives a round trip through legacy mode.
    pub fn set_mode(&mut self, mode: TimestampMode) {
        self.mode = mode;
    }

    /// Set the timestamp stamped onto subsequent records.
    ///
    /// Only meaningful in explicit mode. Calling this in legacy mode is a
    /// caller bug: it panics in debug builds and is ignored (with a warning)
    /// in release builds.
    pub fn set_explicit(&mut self, timestamp: Timestamp) {
        if !self.mode.is_explicit() {
            if cfg!(debug_assertions) {
                panic!(
                    "set_explicit called in {} mode; switch to explicit mode first",
                    self.mode.description()
                );
            } else {
                warn!(
                    mode = self.mode.description(),
                    "Ignoring explicit timestamp set outside explicit mode"
                );
                return;
            }
        }
        self.explicit = timestamp;
    }

    /// Timestamp for the next record entering the buffer.
    pub fn next(&self) -> Timestamp {
        match self.mode {
            TimestampMode::Legacy => self.clock.now(),
            TimestampMode::Explicit => self.explicit,
        }
    }
}

impl std::fmt::Debug for TimestampPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimestampPolicy")
            .field("mode", &self.mode)
            .field("explicit", &self.explicit)
            .finish()
    }
}
