//! Stepper pulse generator.
//!
//! Generic over embedded-hal 1.0 output pins. Timing comes from the caller:
//! every [`Stepper::tick`] is one period of the control loop, and a STEP pulse
//! is held high for exactly one period.

use embedded_hal::digital::OutputPin;

use crate::error::{MotorError, Result};

use super::position::{Direction, Position};

/// Step/direction stepper driver.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
pub struct Stepper<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// STEP pin (rising edge moves one step).
    step_pin: STEP,

    /// DIR pin (high = forward, unless inverted).
    dir_pin: DIR,

    /// Issued and commanded positions.
    position: Position,

    /// Pulses are only generated while enabled.
    enabled: bool,

    /// STEP is high and must be released on the next tick.
    pulse_high: bool,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Driver steps per motor revolution.
    steps_per_revolution: f32,
}

impl<STEP, DIR> Stepper<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// Create a disabled driver at position zero.
    pub(crate) fn new(
        step_pin: STEP,
        dir_pin: DIR,
        steps_per_revolution: f32,
        invert_direction: bool,
    ) -> Self {
        Self {
            step_pin,
            dir_pin,
            position: Position::default(),
            enabled: false,
            pulse_high: false,
            current_direction: None,
            invert_direction,
            steps_per_revolution,
        }
    }

    /// Advance the pulse train by one period.
    ///
    /// A tick that follows a pulse only releases STEP. Otherwise, if the
    /// motor is behind or ahead of the commanded position, sets DIR and
    /// raises STEP for one step toward it. At most one step per two ticks.
    pub fn tick(&mut self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        if self.pulse_high {
            self.step_pin.set_low().map_err(|_| MotorError::PinError)?;
            self.pulse_high = false;
            return Ok(());
        }

        let Some(direction) = self.position.next_step() else {
            return Ok(());
        };

        self.set_direction(direction)?;
        self.step_pin.set_high().map_err(|_| MotorError::PinError)?;
        self.pulse_high = true;
        self.position.step(direction);

        Ok(())
    }

    /// Enable or disable pulse generation.
    ///
    /// Enabling a disabled driver takes the commanded position as the
    /// motor's actual position, so commands that piled up while disabled are
    /// not replayed as one long run. Disabling releases a pending pulse and
    /// keeps both positions.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        if enabled == self.enabled {
            return Ok(());
        }

        if enabled {
            self.position.snap();
        } else if self.pulse_high {
            self.step_pin.set_low().map_err(|_| MotorError::PinError)?;
            self.pulse_high = false;
        }

        self.enabled = enabled;

        #[cfg(feature = "defmt")]
        defmt::debug!("stepper enabled={=bool} at {=i64}", enabled, self.position.current());

        Ok(())
    }

    /// Whether pulses are being generated.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether STEP is currently held high.
    #[inline]
    pub fn is_pulse_high(&self) -> bool {
        self.pulse_high
    }

    /// Issued and commanded positions.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Move the commanded position by a relative number of steps.
    #[inline]
    pub fn advance(&mut self, delta: i64) {
        self.position.advance(delta);
    }

    /// Set the commanded position.
    #[inline]
    pub fn set_desired(&mut self, steps: i64) {
        self.position.set_desired(steps);
    }

    /// Cancel outstanding motion by commanding the current position.
    #[inline]
    pub fn hold(&mut self) {
        self.position.hold();
    }

    /// Driver steps per motor revolution.
    #[inline]
    pub fn steps_per_revolution(&self) -> f32 {
        self.steps_per_revolution
    }

    /// Give the pins back.
    pub fn release(self) -> (STEP, DIR) {
        (self.step_pin, self.dir_pin)
    }

    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Direction::Forward => !self.invert_direction,
            Direction::Reverse => self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }
}
