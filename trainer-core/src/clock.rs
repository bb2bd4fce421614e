//! Millisecond monotonic clock shared by the keyer state machines.
//!
//! All engine entry points take explicit [`Instant`] timestamps, so every
//! state machine is deterministic under test; `Instant::now()` exists for
//! hosts that drive the trainers from a real event loop.

use std::sync::OnceLock;
use std::time::Instant as StdInstant;

static EPOCH: OnceLock<StdInstant> = OnceLock::new();

/// Millisecond-resolution monotonic timestamp.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(u64);

impl Instant {
    /// Current time relative to a process-wide epoch captured on first use.
    pub fn now() -> Self {
        let epoch = *EPOCH.get_or_init(StdInstant::now);
        Self(epoch.elapsed().as_millis() as u64)
    }

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Elapsed milliseconds since `earlier`, saturating at zero.
    pub fn duration_since(&self, earlier: Instant) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Timestamp `ms` milliseconds after `self`, rounded to the nearest
    /// millisecond. Negative offsets clamp to `self`.
    pub fn add_millis(&self, ms: f64) -> Instant {
        Self(self.0.saturating_add(ms.max(0.0).round() as u64))
    }
}
