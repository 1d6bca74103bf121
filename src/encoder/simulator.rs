//! Virtual spindle for bench testing without a lathe.

use crate::config::units::Rpm;
use crate::config::EncoderConfig;
use crate::error::Result;

use super::gray;
use super::source::PositionSource;

/// Spindle rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpindleDirection {
    /// Counts increase.
    #[default]
    Forward,
    /// Counts decrease.
    Reverse,
}

/// A spindle turning at a commanded speed, sampled like a real sensor.
///
/// Each [`sample`](PositionSource::sample) advances the virtual shaft by one
/// sampling interval and returns the Gray code a real sensor would show at
/// that angle.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    modulus: i64,
    steps_per_revolution: f32,
    interval_us: u32,
    speed: Rpm,
    direction: SpindleDirection,
    /// Shaft angle in counts, unbounded.
    position: f64,
}

impl SimulatedSource {
    /// A stopped spindle at angle zero.
    pub fn new(config: &EncoderConfig) -> Self {
        Self {
            modulus: i64::from(config.modulus()),
            steps_per_revolution: config.steps_per_revolution,
            interval_us: config.update_interval_us,
            speed: Rpm(0.0),
            direction: SpindleDirection::Forward,
            position: 0.0,
        }
    }

    /// Set the spindle speed magnitude.
    pub fn set_speed(&mut self, speed: Rpm) {
        self.speed = Rpm(libm::fabsf(speed.0));
    }

    /// Current spindle speed magnitude.
    pub fn speed(&self) -> Rpm {
        self.speed
    }

    /// Set the spindle direction.
    pub fn set_direction(&mut self, direction: SpindleDirection) {
        self.direction = direction;
    }

    /// Current spindle direction.
    pub fn direction(&self) -> SpindleDirection {
        self.direction
    }

    /// Counts the shaft moves per sample at the current speed.
    pub fn counts_per_sample(&self) -> f64 {
        let per_minute = f64::from(self.speed.0) * f64::from(self.steps_per_revolution);
        let magnitude = per_minute / 60.0 * f64::from(self.interval_us) / 1_000_000.0;
        match self.direction {
            SpindleDirection::Forward => magnitude,
            SpindleDirection::Reverse => -magnitude,
        }
    }
}

impl PositionSource for SimulatedSource {
    fn sample(&mut self) -> Result<u32> {
        self.position += self.counts_per_sample();
        let count = libm::floor(self.position) as i64;
        Ok(gray::encode(count.rem_euclid(self.modulus) as u32))
    }
}
