//! Conversions between thread/feed settings and the synchronization ratio.
//!
//! The ratio is stepper steps per sensor count. Spindle to leadscrew is
//! `leadscrew TPI / thread TPI` for threading and `feed × leadscrew TPI` for
//! power feed; both are then scaled by the stepper-to-screw reduction and by
//! stepper steps per sensor count.

use crate::config::units::{InchesPerRev, Millimeters};
use crate::config::{FeedLimits, LeadscrewConfig, SystemConfig};

/// Drivetrain constants needed to turn a setting into a ratio and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioCalculator {
    leadscrew_tpi: f32,
    reduction_factor: f32,
    stepper_steps_per_revolution: f32,
    encoder_steps_per_revolution: f32,
    feed_limits: FeedLimits,
}

impl RatioCalculator {
    /// Build from the leadscrew section and the two step resolutions.
    pub fn new(
        leadscrew: &LeadscrewConfig,
        stepper_steps_per_revolution: f32,
        encoder_steps_per_revolution: f32,
    ) -> Self {
        Self {
            leadscrew_tpi: leadscrew.pitch_tpi,
            reduction_factor: leadscrew.reduction_factor,
            stepper_steps_per_revolution,
            encoder_steps_per_revolution,
            feed_limits: leadscrew.feed_limits,
        }
    }

    /// Build from a full system configuration.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(
            &config.leadscrew,
            config.stepper.steps_per_revolution,
            config.encoder.steps_per_revolution,
        )
    }

    /// Stepper steps per sensor count for one leadscrew turn per spindle turn.
    #[inline]
    fn drive_factor(&self) -> f32 {
        self.reduction_factor * self.stepper_steps_per_revolution / self.encoder_steps_per_revolution
    }

    /// Ratio that cuts `tpi` threads per inch.
    pub fn tpi_ratio(&self, tpi: f32) -> f32 {
        self.leadscrew_tpi / tpi * self.drive_factor()
    }

    /// Thread count per inch cut at `ratio`.
    pub fn tpi_from_ratio(&self, ratio: f32) -> f32 {
        self.leadscrew_tpi * self.drive_factor() / ratio
    }

    /// Ratio that cuts a metric thread of `pitch`.
    pub fn metric_ratio(&self, pitch: Millimeters) -> f32 {
        self.tpi_ratio(pitch.to_tpi())
    }

    /// Metric pitch cut at `ratio`.
    pub fn metric_from_ratio(&self, ratio: f32) -> Millimeters {
        Millimeters::from_tpi(self.tpi_from_ratio(ratio))
    }

    /// Ratio that feeds the carriage by `feed` per spindle turn.
    ///
    /// No clamping here; see [`clamp_feed`](Self::clamp_feed).
    pub fn feed_ratio(&self, feed: InchesPerRev) -> f32 {
        feed.0 * self.leadscrew_tpi * self.drive_factor()
    }

    /// Feed per spindle turn at `ratio`.
    pub fn feed_from_ratio(&self, ratio: f32) -> InchesPerRev {
        InchesPerRev(ratio / (self.leadscrew_tpi * self.drive_factor()))
    }

    /// Clamp a feed request into the configured range.
    pub fn clamp_feed(&self, feed: InchesPerRev) -> InchesPerRev {
        self.feed_limits.apply(feed)
    }

    /// Configured power-feed range.
    pub fn feed_limits(&self) -> FeedLimits {
        self.feed_limits
    }
}
