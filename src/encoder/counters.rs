//! Spindle motion counters shared between the sensor tick and its readers.

use core::sync::atomic::{AtomicI32, AtomicI64, Ordering};

/// Rotation published by the sensor tick.
///
/// Two independent cells: the delta not yet consumed by the synchronization
/// loop, and the cumulative position read by the tachometer. Only the sensor
/// tick adds to them. Draining swaps the pending delta for zero, so each count
/// is handed out exactly once.
///
/// Can be placed in a `static`:
///
/// ```rust
/// use electronic_leadscrew::encoder::EncoderCounters;
///
/// static SPINDLE: EncoderCounters = EncoderCounters::new();
/// assert_eq!(SPINDLE.cumulative_position(), 0);
/// ```
#[derive(Debug, Default)]
pub struct EncoderCounters {
    pending: AtomicI32,
    cumulative: AtomicI64,
}

impl EncoderCounters {
    /// Counters at zero.
    pub const fn new() -> Self {
        Self {
            pending: AtomicI32::new(0),
            cumulative: AtomicI64::new(0),
        }
    }

    /// Add one tick's worth of rotation.
    #[inline]
    pub(crate) fn record(&self, diff: i32) {
        self.pending.fetch_add(diff, Ordering::AcqRel);
        self.cumulative.fetch_add(i64::from(diff), Ordering::AcqRel);
    }

    /// Take the rotation accumulated since the previous drain.
    #[inline]
    pub fn drain_delta(&self) -> i32 {
        self.pending.swap(0, Ordering::AcqRel)
    }

    /// Peek at the undrained rotation without consuming it.
    #[inline]
    pub fn pending_delta(&self) -> i32 {
        self.pending.load(Ordering::Acquire)
    }

    /// Signed rotation since start, in sensor counts.
    #[inline]
    pub fn cumulative_position(&self) -> i64 {
        self.cumulative.load(Ordering::Acquire)
    }
}
