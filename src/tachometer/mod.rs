//! Spindle speed measurement.
//!
//! [`Tachometer`] runs at its own cadence (10 ms by default), samples the
//! cumulative spindle position, and publishes a smoothed RPM through a
//! [`SpeedReading`] that any context can read.

mod clock;
mod estimator;

#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::Clock;
pub use estimator::{SpeedEstimator, HISTORY_DEPTH};

use crate::config::units::Rpm;
use crate::encoder::EncoderCounters;
use crate::shared::AtomicF32;

/// Published spindle speed.
#[derive(Debug, Default)]
pub struct SpeedReading {
    rpm: AtomicF32,
}

impl SpeedReading {
    /// Reads 0 RPM until the first publish.
    pub const fn new() -> Self {
        Self {
            rpm: AtomicF32::zero(),
        }
    }

    /// Latest smoothed speed.
    #[inline]
    pub fn speed(&self) -> Rpm {
        Rpm(self.rpm.load())
    }

    #[inline]
    pub(crate) fn publish(&self, speed: Rpm) {
        self.rpm.store(speed.0);
    }
}

/// Periodic speed task.
pub struct Tachometer<'a, C: Clock> {
    encoder: &'a EncoderCounters,
    reading: &'a SpeedReading,
    clock: C,
    estimator: SpeedEstimator,
}

impl<'a, C: Clock> Tachometer<'a, C> {
    /// Create and take the baseline sample.
    pub fn new(
        encoder: &'a EncoderCounters,
        reading: &'a SpeedReading,
        mut clock: C,
        steps_per_revolution: f32,
    ) -> Self {
        let mut estimator = SpeedEstimator::new(steps_per_revolution);
        estimator.prime(encoder.cumulative_position(), clock.now_us());

        Self {
            encoder,
            reading,
            clock,
            estimator,
        }
    }

    /// Sample and publish. Returns the new speed, or `None` if the clock did
    /// not advance since the last sample.
    pub fn tick(&mut self) -> Option<Rpm> {
        let position = self.encoder.cumulative_position();
        let now = self.clock.now_us();

        let speed = self.estimator.update(position, now)?;
        self.reading.publish(speed);
        Some(speed)
    }

    /// Latest average, same value as the published reading.
    #[inline]
    pub fn speed(&self) -> Rpm {
        self.estimator.speed()
    }

    /// Borrow the estimator.
    pub fn estimator(&self) -> &SpeedEstimator {
        &self.estimator
    }
}
