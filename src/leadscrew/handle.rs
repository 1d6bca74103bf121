//! UI-side control of the leadscrew.

use core::fmt;

use crate::config::units::{InchesPerRev, Millimeters, Rpm};
use crate::config::{FeedMode, LeadscrewDefaults};
use crate::encoder::EncoderCounters;
use crate::error::{RatioError, Result};
use crate::tachometer::SpeedReading;

use super::ratio::RatioCalculator;
use super::state::LeadscrewState;

/// Copyable handle for reading and commanding the leadscrew from any context.
///
/// Every setter publishes a complete command word in one atomic operation;
/// the control loop picks it up on its next tick.
#[derive(Debug, Clone, Copy)]
pub struct LeadscrewHandle<'a> {
    state: &'a LeadscrewState,
    encoder: &'a EncoderCounters,
    speed: &'a SpeedReading,
    ratios: RatioCalculator,
}

impl<'a> LeadscrewHandle<'a> {
    /// Create a handle over the shared cells.
    pub fn new(
        state: &'a LeadscrewState,
        encoder: &'a EncoderCounters,
        speed: &'a SpeedReading,
        ratios: RatioCalculator,
    ) -> Self {
        Self {
            state,
            encoder,
            speed,
            ratios,
        }
    }

    /// Engage (follow the spindle) or disengage.
    ///
    /// Engaging an already engaged leadscrew changes nothing. A real
    /// transition starts a new engage epoch: the control loop then takes the
    /// stepper's current position as its target and drops spindle motion
    /// that accumulated while disengaged.
    pub fn engage(&self, engage: bool) {
        let was_engaged = self.state.set_engaged(engage);

        #[cfg(feature = "defmt")]
        {
            if was_engaged != engage {
                defmt::info!("Leadscrew engaged={=bool}", engage);
            }
        }
        #[cfg(not(feature = "defmt"))]
        let _ = was_engaged;
    }

    /// Whether the leadscrew follows the spindle.
    #[inline]
    pub fn is_engaged(&self) -> bool {
        self.state.snapshot().engaged
    }

    /// Cut an imperial thread of `tpi` threads per inch.
    ///
    /// # Errors
    ///
    /// [`RatioError::ZeroTpi`] for `tpi == 0`; the ratio is left unchanged.
    pub fn set_thread_tpi(&self, tpi: u16) -> Result<()> {
        if tpi == 0 {
            return Err(RatioError::ZeroTpi.into());
        }

        self.state.set_ratio(FeedMode::Tpi, self.ratios.tpi_ratio(f32::from(tpi)));

        #[cfg(feature = "defmt")]
        defmt::info!("Thread set to {} TPI", tpi);

        Ok(())
    }

    /// Thread count per inch equivalent to the current ratio.
    pub fn thread_tpi(&self) -> f32 {
        self.ratios.tpi_from_ratio(self.ratio())
    }

    /// Cut a metric thread of `pitch`.
    ///
    /// # Errors
    ///
    /// [`RatioError::InvalidPitch`] unless the pitch is positive and finite.
    pub fn set_thread_metric(&self, pitch: Millimeters) -> Result<()> {
        if !(pitch.0 > 0.0) || !pitch.0.is_finite() {
            return Err(RatioError::InvalidPitch(pitch.0).into());
        }

        self.state.set_ratio(FeedMode::Metric, self.ratios.metric_ratio(pitch));

        #[cfg(feature = "defmt")]
        defmt::info!("Thread set to {} mm", pitch.0);

        Ok(())
    }

    /// Metric pitch equivalent to the current ratio.
    pub fn thread_metric(&self) -> Millimeters {
        self.ratios.metric_from_ratio(self.ratio())
    }

    /// Power-feed at `feed` per spindle revolution.
    ///
    /// Requests outside the configured limits are clamped. Returns the feed
    /// actually applied.
    ///
    /// # Errors
    ///
    /// [`RatioError::InvalidFeed`] for NaN or infinite input.
    pub fn set_feed_rate(&self, feed: InchesPerRev) -> Result<InchesPerRev> {
        if !feed.0.is_finite() {
            return Err(RatioError::InvalidFeed(feed.0).into());
        }

        let applied = self.ratios.clamp_feed(feed);

        #[cfg(feature = "defmt")]
        {
            if applied != feed {
                defmt::warn!("Feed {} clamped to {}", feed.0, applied.0);
            }
        }

        self.state.set_ratio(FeedMode::Feed, self.ratios.feed_ratio(applied));
        Ok(applied)
    }

    /// Feed per revolution equivalent to the current ratio.
    pub fn feed_rate(&self) -> InchesPerRev {
        self.ratios.feed_from_ratio(self.ratio())
    }

    /// Apply the startup value for the configured mode.
    pub fn apply_defaults(&self, defaults: &LeadscrewDefaults) -> Result<()> {
        match defaults.mode {
            FeedMode::Tpi => self.set_thread_tpi(defaults.tpi),
            FeedMode::Metric => self.set_thread_metric(defaults.metric_pitch),
            FeedMode::Feed => self.set_feed_rate(defaults.feed).map(|_| ()),
        }
    }

    /// Current ratio in stepper steps per sensor count.
    #[inline]
    pub fn ratio(&self) -> f32 {
        self.state.snapshot().ratio
    }

    /// Which setter produced the current ratio.
    #[inline]
    pub fn mode(&self) -> FeedMode {
        self.state.snapshot().mode
    }

    /// Control loop iterations so far.
    #[inline]
    pub fn watchdog(&self) -> u32 {
        self.state.watchdog()
    }

    /// Smoothed spindle speed.
    #[inline]
    pub fn speed(&self) -> Rpm {
        self.speed.speed()
    }

    /// Spindle position in sensor counts since startup.
    #[inline]
    pub fn spindle_position(&self) -> i64 {
        self.encoder.cumulative_position()
    }

    /// Ratio conversions used by this handle.
    pub fn ratios(&self) -> &RatioCalculator {
        &self.ratios
    }

    /// Gather everything a display needs from one command snapshot.
    pub fn status(&self) -> Status {
        let control = self.state.snapshot();

        Status {
            engaged: control.engaged,
            mode: control.mode,
            ratio: control.ratio,
            tpi: self.ratios.tpi_from_ratio(control.ratio),
            metric_pitch: self.ratios.metric_from_ratio(control.ratio),
            feed: self.ratios.feed_from_ratio(control.ratio),
            speed: self.speed.speed(),
            spindle_position: self.encoder.cumulative_position(),
            watchdog: self.state.watchdog(),
        }
    }
}

/// Point-in-time view of the leadscrew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    /// Following the spindle.
    pub engaged: bool,
    /// Mode of the current ratio.
    pub mode: FeedMode,
    /// Stepper steps per sensor count.
    pub ratio: f32,
    /// Ratio expressed as threads per inch.
    pub tpi: f32,
    /// Ratio expressed as metric pitch.
    pub metric_pitch: Millimeters,
    /// Ratio expressed as feed per revolution.
    pub feed: InchesPerRev,
    /// Smoothed spindle speed.
    pub speed: Rpm,
    /// Spindle counts since startup.
    pub spindle_position: i64,
    /// Control loop iterations.
    pub watchdog: u32,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Spindle: {} | Speed: {:.1} RPM | ",
            self.spindle_position, self.speed.0
        )?;

        match self.mode {
            FeedMode::Tpi => write!(f, "Mode: TPI | Pitch: {:.1} TPI", self.tpi)?,
            FeedMode::Metric => write!(
                f,
                "Mode: Metric | Pitch: {:.2} mm ({:.2} TPI)",
                self.metric_pitch.0, self.tpi
            )?,
            FeedMode::Feed => write!(f, "Mode: Feed | {:.4} in/rev", self.feed.0)?,
        }

        let engaged = if self.engaged { "Engaged" } else { "Disengaged" };
        write!(f, " | {} | Ratio: {:.5}", engaged, self.ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FeedLimits, LeadscrewConfig};
    use crate::error::Error;

    struct Shared {
        state: LeadscrewState,
        encoder: EncoderCounters,
        speed: SpeedReading,
    }

    impl Shared {
        fn new() -> Self {
            Self {
                state: LeadscrewState::new(),
                encoder: EncoderCounters::new(),
                speed: SpeedReading::new(),
            }
        }

        fn handle(&self) -> LeadscrewHandle<'_> {
            let ratios = RatioCalculator::new(&LeadscrewConfig::default(), 2400.0, 4096.0);
            LeadscrewHandle::new(&self.state, &self.encoder, &self.speed, ratios)
        }
    }

    #[test]
    fn test_tpi_roundtrip() {
        let shared = Shared::new();
        let handle = shared.handle();

        handle.set_thread_tpi(20).unwrap();
        assert_eq!(handle.mode(), FeedMode::Tpi);
        assert!((handle.thread_tpi() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_tpi_rejected() {
        let shared = Shared::new();
        let handle = shared.handle();
        handle.set_thread_tpi(16).unwrap();
        let before = handle.ratio();

        assert_eq!(handle.set_thread_tpi(0), Err(Error::Ratio(RatioError::ZeroTpi)));
        assert_eq!(handle.ratio(), before);
    }

    #[test]
    fn test_metric_roundtrip() {
        let shared = Shared::new();
        let handle = shared.handle();

        handle.set_thread_metric(Millimeters(1.25)).unwrap();
        assert_eq!(handle.mode(), FeedMode::Metric);
        assert!((handle.thread_metric().0 - 1.25).abs() < 1e-4);
    }

    #[test]
    fn test_bad_metric_rejected() {
        let shared = Shared::new();
        let handle = shared.handle();

        assert!(handle.set_thread_metric(Millimeters(0.0)).is_err());
        assert!(handle.set_thread_metric(Millimeters(-1.0)).is_err());
        assert!(handle.set_thread_metric(Millimeters(f32::NAN)).is_err());
        assert_eq!(handle.ratio(), 1.0);
    }

    #[test]
    fn test_feed_clamped() {
        let shared = Shared::new();
        let handle = shared.handle();
        let limits = FeedLimits::default();

        assert_eq!(handle.set_feed_rate(InchesPerRev(5.0)).unwrap(), limits.max);
        assert!((handle.feed_rate().0 - limits.max.0).abs() < 1e-6);

        assert_eq!(handle.set_feed_rate(InchesPerRev(0.0)).unwrap(), limits.min);
        assert!((handle.feed_rate().0 - limits.min.0).abs() < 1e-6);

        assert!(handle.set_feed_rate(InchesPerRev(f32::NAN)).is_err());
    }

    #[test]
    fn test_engage_toggles() {
        let shared = Shared::new();
        let handle = shared.handle();

        assert!(!handle.is_engaged());
        handle.engage(true);
        assert!(handle.is_engaged());
        handle.engage(false);
        assert!(!handle.is_engaged());
    }

    #[test]
    fn test_status_display() {
        let shared = Shared::new();
        let handle = shared.handle();
        handle.set_thread_tpi(16).unwrap();
        handle.engage(true);

        let status = handle.status();
        assert!(status.engaged);
        assert_eq!(status.mode, FeedMode::Tpi);

        let text = format!("{}", status);
        assert!(text.contains("Mode: TPI"));
        assert!(text.contains("16.0 TPI"));
        assert!(text.ends_with(&format!("Ratio: {:.5}", status.ratio)));
        assert!(text.contains("| Engaged |"));
    }
}
