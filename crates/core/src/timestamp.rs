//! Microsecond-precision timestamps and the stamping policy types
//!
//! Every record carries the moment it was accepted, as microseconds since
//! Unix epoch (1970-01-01 00:00:00 UTC). The value is signed because the
//! recording contract transports it as a 64-bit signed integer; pre-epoch
//! values are representable even though no clock here produces them.
//!
//! ## Usage
//!
//! Never expose raw arithmetic. Use explicit constructors:
//!
//! ```
//! use biotape_core::Timestamp;
//!
//! let now = Timestamp::now();
//! let from_secs = Timestamp::from_secs(1000);
//! let from_micros = Timestamp::from_micros(1_000_000_000);
//! ```

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Microsecond-precision timestamp
///
/// Represents a point in time as microseconds since Unix epoch.
/// This is the canonical time representation in a session log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Maximum representable timestamp
    pub const MAX: Timestamp = Timestamp(i64::MAX);

    /// Create a timestamp for the current moment
    ///
    /// Uses system time. Returns epoch (0) if the system clock is before
    /// Unix epoch (e.g., clock went backwards due to NTP adjustment).
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp(duration.as_micros() as i64)
    }

    /// Create a timestamp from microseconds since epoch
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Timestamp(micros)
    }

    /// Create a timestamp from milliseconds since epoch
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Timestamp(millis.saturating_mul(1_000))
    }

    /// Create a timestamp from seconds since epoch
    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1_000_000))
    }

    /// Get microseconds since Unix epoch
    #[inline]
    pub const fn as_micros(&self) -> i64 {
        self.0
    }

    /// Get milliseconds since Unix epoch (truncates toward negative infinity)
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0.div_euclid(1_000)
    }

    /// Get seconds since Unix epoch (truncates toward negative infinity)
    #[inline]
    pub const fn as_secs(&self) -> i64 {
        self.0.div_euclid(1_000_000)
    }

    /// Check if this timestamp is before another
    #[inline]
    pub fn is_before(&self, other: Timestamp) -> bool {
        self.0 < other.0
    }

    /// Check if this timestamp is after another
    #[inline]
    pub fn is_after(&self, other: Timestamp) -> bool {
        self.0 > other.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::EPOCH
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format as "seconds.microseconds" for readability
        let secs = self.0.div_euclid(1_000_000);
        let micros = self.0.rem_euclid(1_000_000);
        write!(f, "{}.{:06}", secs, micros)
    }
}

impl From<i64> for Timestamp {
    /// Create from raw microseconds
    fn from(micros: i64) -> Self {
        Timestamp::from_micros(micros)
    }
}

impl From<Timestamp> for i64 {
    /// Extract raw microseconds
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

/// Timestamp assignment policy for accepted records
///
/// | Mode | Stamp source |
/// |------|-------------|
/// | Legacy | the writer's clock, at the moment the record is accepted |
/// | Explicit | the last value supplied via `set_timestamp` (epoch before the first) |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampMode {
    /// Library-managed time: each record is stamped when it is accepted
    Legacy,

    /// Caller-managed time: records carry the last explicitly set value
    ///
    /// The set value persists across records until changed again.
    Explicit,
}

impl TimestampMode {
    /// Check if the caller controls record timestamps in this mode
    pub fn is_explicit(&self) -> bool {
        matches!(self, TimestampMode::Explicit)
    }

    /// Human-readable description of the mode
    pub fn description(&self) -> &'static str {
        match self {
            TimestampMode::Legacy => "Legacy (library clock stamps each record)",
            TimestampMode::Explicit => "Explicit (caller-supplied timestamps)",
        }
    }
}

impl Default for TimestampMode {
    fn default() -> Self {
        TimestampMode::Legacy
    }
}

/// Time source used to stamp records in Legacy mode
///
/// The writer never reads the system clock directly; it goes through this
/// trait so tests can substitute a deterministic source.
pub trait Clock: Send + Sync {
    /// Current moment according to this source
    fn now(&self) -> Timestamp;
}

/// System wall clock
///
/// Delegates to [`Timestamp::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
