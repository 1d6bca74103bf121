//! Engagement and ratio state shared between the UI and the control loop.
//!
//! The whole command (ratio, engaged flag, mode, engage epoch) is packed into
//! one `u64` so the control loop reads it with a single atomic load and a UI
//! writer can never leave a ratio from one command paired with the mode of
//! another.

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::config::FeedMode;

const RATIO_MASK: u64 = 0xFFFF_FFFF;
const ENGAGED_BIT: u64 = 1 << 32;
const MODE_SHIFT: u32 = 33;
const MODE_MASK: u64 = 0b11;
const EPOCH_SHIFT: u32 = 40;
const EPOCH_MASK: u64 = 0x00FF_FFFF;

/// Bits of `1.0f32`: disengaged, TPI mode, epoch 0.
const INITIAL_CONTROL: u64 = 0x3F80_0000;

/// One consistent snapshot of the command state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlWord {
    /// Whether the leadscrew follows the spindle.
    pub engaged: bool,
    /// Which setter produced `ratio`.
    pub mode: FeedMode,
    /// Stepper steps per sensor count.
    pub ratio: f32,
    /// Bumped on every disengaged-to-engaged transition.
    epoch: u32,
}

impl ControlWord {
    /// Engage counter; the control loop resynchronizes when it changes.
    #[inline]
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    fn pack(self) -> u64 {
        let mode = match self.mode {
            FeedMode::Tpi => 0,
            FeedMode::Metric => 1,
            FeedMode::Feed => 2,
        };
        let engaged = if self.engaged { ENGAGED_BIT } else { 0 };

        u64::from(self.ratio.to_bits())
            | engaged
            | (mode & MODE_MASK) << MODE_SHIFT
            | (u64::from(self.epoch) & EPOCH_MASK) << EPOCH_SHIFT
    }

    fn unpack(bits: u64) -> Self {
        let mode = match (bits >> MODE_SHIFT) & MODE_MASK {
            1 => FeedMode::Metric,
            2 => FeedMode::Feed,
            _ => FeedMode::Tpi,
        };

        Self {
            engaged: bits & ENGAGED_BIT != 0,
            mode,
            ratio: f32::from_bits((bits & RATIO_MASK) as u32),
            epoch: ((bits >> EPOCH_SHIFT) & EPOCH_MASK) as u32,
        }
    }
}

/// Command word plus the control loop's liveness counter.
///
/// Can be placed in a `static`; [`new`](Self::new) is `const`.
#[derive(Debug)]
pub struct LeadscrewState {
    control: AtomicU64,
    watchdog: AtomicU32,
}

impl Default for LeadscrewState {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadscrewState {
    /// Disengaged, TPI mode, ratio 1.0.
    pub const fn new() -> Self {
        Self {
            control: AtomicU64::new(INITIAL_CONTROL),
            watchdog: AtomicU32::new(0),
        }
    }

    /// Read the whole command state at once.
    #[inline]
    pub fn snapshot(&self) -> ControlWord {
        ControlWord::unpack(self.control.load(Ordering::Acquire))
    }

    /// Apply `f` atomically and return the word it replaced.
    pub(crate) fn update<F>(&self, mut f: F) -> ControlWord
    where
        F: FnMut(ControlWord) -> ControlWord,
    {
        let previous = self
            .control
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some(f(ControlWord::unpack(bits)).pack())
            })
            .unwrap_or_else(|bits| bits);
        ControlWord::unpack(previous)
    }

    /// Publish a new ratio and the mode it came from.
    pub(crate) fn set_ratio(&self, mode: FeedMode, ratio: f32) {
        self.update(|word| ControlWord { mode, ratio, ..word });
    }

    /// Engage or disengage. Returns the previous engaged flag.
    pub(crate) fn set_engaged(&self, engaged: bool) -> bool {
        let previous = self.update(|word| {
            if engaged && !word.engaged {
                ControlWord {
                    engaged: true,
                    epoch: word.epoch.wrapping_add(1) & EPOCH_MASK as u32,
                    ..word
                }
            } else {
                ControlWord { engaged, ..word }
            }
        });
        previous.engaged
    }

    /// Control loop iterations so far (wrapping).
    #[inline]
    pub fn watchdog(&self) -> u32 {
        self.watchdog.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn feed_watchdog(&self) {
        self.watchdog.fetch_add(1, Ordering::Release);
    }
}
