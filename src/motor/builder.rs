//! Builder pattern for Stepper.

use embedded_hal::digital::OutputPin;

use crate::config::StepperConfig;
use crate::error::{ConfigError, Error, Result};

use super::driver::Stepper;

/// Builder for creating Stepper instances.
pub struct StepperBuilder<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    steps_per_revolution: Option<f32>,
    invert_direction: bool,
}

impl<STEP, DIR> Default for StepperBuilder<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR> StepperBuilder<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            step_pin: None,
            dir_pin: None,
            steps_per_revolution: None,
            invert_direction: false,
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set driver steps per motor revolution (microstepping included).
    pub fn steps_per_revolution(mut self, steps: f32) -> Self {
        self.steps_per_revolution = Some(steps);
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Configure from a StepperConfig.
    pub fn from_config(mut self, config: &StepperConfig) -> Self {
        self.steps_per_revolution = Some(config.steps_per_revolution);
        self.invert_direction = config.invert_direction;
        self
    }

    /// Build the Stepper, disabled and at position zero.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin or the step count is missing, or the step
    /// count is not positive.
    pub fn build(self) -> Result<Stepper<STEP, DIR>> {
        let step_pin = self
            .step_pin
            .ok_or(Error::Config(ConfigError::MissingField("step_pin")))?;

        let dir_pin = self
            .dir_pin
            .ok_or(Error::Config(ConfigError::MissingField("dir_pin")))?;

        let steps = self
            .steps_per_revolution
            .ok_or(Error::Config(ConfigError::MissingField("steps_per_revolution")))?;

        if !(steps > 0.0) {
            return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(steps)));
        }

        Ok(Stepper::new(step_pin, dir_pin, steps, self.invert_direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::test_pin::TestPin;

    #[test]
    fn test_build_from_config() {
        let config = StepperConfig {
            steps_per_revolution: 1600.0,
            invert_direction: true,
        };

        let stepper = StepperBuilder::new()
            .step_pin(TestPin::default())
            .dir_pin(TestPin::default())
            .from_config(&config)
            .build()
            .unwrap();

        assert_eq!(stepper.steps_per_revolution(), 1600.0);
        assert!(!stepper.is_enabled());
    }

    #[test]
    fn test_missing_pin() {
        let result = StepperBuilder::<TestPin, TestPin>::new()
            .step_pin(TestPin::default())
            .steps_per_revolution(200.0)
            .build();

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField("dir_pin")))
        ));
    }
}
