//! Wiring of the four controller parts from one configuration.
//!
//! The parts run in different execution contexts (sensor sampling, control
//! loop, speed task, UI) and share nothing but the cells in [`SharedState`].
//! On a target that is a `static`; on a host it can live on the stack of a
//! `std::thread::scope`.

use embedded_hal::digital::OutputPin;

use crate::config::{validate_config, SystemConfig};
use crate::encoder::{Encoder, EncoderCounters, PositionSource};
use crate::error::Result;
use crate::leadscrew::{Leadscrew, LeadscrewHandle, LeadscrewState, RatioCalculator};
use crate::motor::StepperBuilder;
use crate::tachometer::{Clock, SpeedReading, Tachometer};

/// Every value that crosses an execution context.
///
/// ```
/// use electronic_leadscrew::SharedState;
///
/// static SHARED: SharedState = SharedState::new();
/// assert!(!SHARED.leadscrew.snapshot().engaged);
/// ```
#[derive(Debug, Default)]
pub struct SharedState {
    /// Spindle motion published by the sensor tick.
    pub encoder: EncoderCounters,
    /// Command word and watchdog.
    pub leadscrew: LeadscrewState,
    /// Smoothed spindle speed.
    pub speed: SpeedReading,
}

impl SharedState {
    /// Zeroed counters, disengaged, ratio 1.0, 0 RPM.
    pub const fn new() -> Self {
        Self {
            encoder: EncoderCounters::new(),
            leadscrew: LeadscrewState::new(),
            speed: SpeedReading::new(),
        }
    }
}

/// The assembled controller.
///
/// Fields are public so each part can be moved to the context that ticks it.
///
/// # Example
///
/// ```rust,ignore
/// static SHARED: SharedState = SharedState::new();
///
/// let config = electronic_leadscrew::load_config("lathe.toml")?;
/// let LeadscrewSystem { mut encoder, mut leadscrew, mut tachometer, handle } =
///     LeadscrewSystem::new(&config, &SHARED, spi_source, step_pin, dir_pin, timer)?;
///
/// // 10 µs timer interrupt
/// encoder.tick()?;
/// leadscrew.tick()?;
///
/// // 10 ms task
/// tachometer.tick();
///
/// // UI
/// handle.set_thread_tpi(20)?;
/// handle.engage(true);
/// ```
pub struct LeadscrewSystem<'a, S, STEP, DIR, C>
where
    S: PositionSource,
    STEP: OutputPin,
    DIR: OutputPin,
    C: Clock,
{
    /// Sensor sampling; tick every `encoder.update_interval_us`.
    pub encoder: Encoder<'a, S>,
    /// Control loop; tick right after the sensor.
    pub leadscrew: Leadscrew<'a, STEP, DIR>,
    /// Speed task; tick every `tachometer.update_interval_us`.
    pub tachometer: Tachometer<'a, C>,
    /// UI access.
    pub handle: LeadscrewHandle<'a>,
}

impl<'a, S, STEP, DIR, C> LeadscrewSystem<'a, S, STEP, DIR, C>
where
    S: PositionSource,
    STEP: OutputPin,
    DIR: OutputPin,
    C: Clock,
{
    /// Validate `config` and build every part over `shared`.
    ///
    /// The controller starts disengaged with the configured default ratio.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the sensor's
    /// baseline sample fails.
    pub fn new(
        config: &SystemConfig,
        shared: &'a SharedState,
        source: S,
        step_pin: STEP,
        dir_pin: DIR,
        clock: C,
    ) -> Result<Self> {
        validate_config(config)?;

        let encoder = Encoder::from_config(source, &shared.encoder, &config.encoder)?;

        let stepper = StepperBuilder::new()
            .step_pin(step_pin)
            .dir_pin(dir_pin)
            .from_config(&config.stepper)
            .build()?;
        let leadscrew = Leadscrew::new(stepper, &shared.encoder, &shared.leadscrew);

        let tachometer = Tachometer::new(
            &shared.encoder,
            &shared.speed,
            clock,
            config.encoder.steps_per_revolution,
        );

        let handle = LeadscrewHandle::new(
            &shared.leadscrew,
            &shared.encoder,
            &shared.speed,
            RatioCalculator::from_config(config),
        );
        handle.engage(false);
        handle.apply_defaults(&config.leadscrew.defaults)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Leadscrew ready: {} TPI screw, ratio {}",
            config.leadscrew.pitch_tpi,
            handle.ratio()
        );

        Ok(Self {
            encoder,
            leadscrew,
            tachometer,
            handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedMode;
    use crate::encoder::SimulatedSource;
    use crate::error::{ConfigError, Error};
    use crate::motor::test_pin::TestPin;

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_us(&mut self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_starts_disengaged_with_default_ratio() {
        let shared = SharedState::new();
        let config = SystemConfig::default();
        let source = SimulatedSource::new(&config.encoder);

        let system = LeadscrewSystem::new(
            &config,
            &shared,
            source,
            TestPin::default(),
            TestPin::default(),
            FixedClock(0),
        )
        .unwrap();

        assert!(!system.handle.is_engaged());
        assert_eq!(system.handle.mode(), FeedMode::Tpi);
        assert!((system.handle.thread_tpi() - 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let shared = SharedState::new();
        let mut config = SystemConfig::default();
        config.stepper.steps_per_revolution = 0.0;
        let source = SimulatedSource::new(&config.encoder);

        let result = LeadscrewSystem::new(
            &config,
            &shared,
            source,
            TestPin::default(),
            TestPin::default(),
            FixedClock(0),
        );

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidStepsPerRevolution(_)))
        ));
    }
}
