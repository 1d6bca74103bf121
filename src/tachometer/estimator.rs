//! Moving-average spindle speed from cumulative position samples.

use heapless::HistoryBuffer;

use crate::config::units::Rpm;

/// Samples in the moving average.
pub const HISTORY_DEPTH: usize = 10;

const MICROS_PER_MINUTE: f32 = 60_000_000.0;

#[derive(Debug, Clone, Copy)]
struct Sample {
    position: i64,
    time_us: u64,
}

/// Spindle speed estimator.
///
/// Each update turns the position change since the previous sample into an
/// instantaneous RPM and pushes it into a ring of [`HISTORY_DEPTH`] entries
/// (zero-filled at start). The published speed is the mean magnitude of the
/// ring, so it is always non-negative and a single outlier is gone after
/// `HISTORY_DEPTH` further updates.
#[derive(Debug, Clone)]
pub struct SpeedEstimator {
    steps_per_revolution: f32,
    history: HistoryBuffer<f32, HISTORY_DEPTH>,
    last: Option<Sample>,
    speed: Rpm,
}

impl SpeedEstimator {
    /// Create an estimator for a sensor with `steps_per_revolution` counts per turn.
    pub fn new(steps_per_revolution: f32) -> Self {
        Self {
            steps_per_revolution,
            history: HistoryBuffer::new_with(0.0),
            last: None,
            speed: Rpm(0.0),
        }
    }

    /// Take a baseline without producing a reading.
    pub fn prime(&mut self, position: i64, now_us: u64) {
        self.last = Some(Sample { position, time_us: now_us });
    }

    /// Feed one sample and return the new average.
    ///
    /// Returns `None` (and leaves every state untouched) for the first sample,
    /// which only sets the baseline, and for a sample whose timestamp is not
    /// after the previous one.
    pub fn update(&mut self, position: i64, now_us: u64) -> Option<Rpm> {
        let Some(last) = self.last else {
            self.prime(position, now_us);
            return None;
        };

        let elapsed = now_us.checked_sub(last.time_us).filter(|&dt| dt > 0)?;
        let moved = position.wrapping_sub(last.position);

        let instantaneous = moved as f32 / elapsed as f32 / self.steps_per_revolution * MICROS_PER_MINUTE;
        self.history.write(instantaneous);
        self.last = Some(Sample { position, time_us: now_us });

        let total: f32 = self.history.as_slice().iter().map(|rpm| libm::fabsf(*rpm)).sum();
        self.speed = Rpm(total / HISTORY_DEPTH as f32);

        Some(self.speed)
    }

    /// Latest average.
    #[inline]
    pub fn speed(&self) -> Rpm {
        self.speed
    }

    /// Most recent instantaneous sample, signed (negative in reverse).
    ///
    /// `None` until a baseline exists; `0.0` until the first reading.
    pub fn latest(&self) -> Option<f32> {
        self.last.and(self.history.recent().copied())
    }
}
