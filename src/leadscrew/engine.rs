//! Control-loop side of the leadscrew: spindle delta in, stepper target out.

use embedded_hal::digital::OutputPin;

use crate::encoder::EncoderCounters;
use crate::error::Result;
use crate::motor::{Position, Stepper};

use super::state::LeadscrewState;

/// Slaves a stepper to the spindle sensor at the commanded ratio.
///
/// Owned by the control context. Commands arrive through [`LeadscrewState`]
/// (written by a [`LeadscrewHandle`](super::LeadscrewHandle)); spindle motion
/// arrives through [`EncoderCounters`].
pub struct Leadscrew<'a, STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    stepper: Stepper<STEP, DIR>,
    encoder: &'a EncoderCounters,
    state: &'a LeadscrewState,

    /// Engage epoch this loop last synchronized to.
    epoch: u32,

    /// Sub-step remainder of `delta × ratio`, kept between ticks.
    carry: f32,
}

impl<'a, STEP, DIR> Leadscrew<'a, STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// Wrap `stepper`. Starts synchronized to the current engage epoch.
    pub fn new(stepper: Stepper<STEP, DIR>, encoder: &'a EncoderCounters, state: &'a LeadscrewState) -> Self {
        Self {
            stepper,
            encoder,
            state,
            epoch: state.snapshot().epoch(),
            carry: 0.0,
        }
    }

    /// One control period.
    ///
    /// Always bumps the watchdog. While disengaged the stepper is disabled and
    /// spindle delta is left in the counters. On the first tick after an
    /// engage, the target is reset to the current position and any backlog
    /// is discarded, so engaging never produces a catch-up burst. Engaged
    /// ticks move the target by `delta × ratio` and emit at most one step.
    pub fn tick(&mut self) -> Result<()> {
        self.state.feed_watchdog();
        let control = self.state.snapshot();

        if control.epoch() != self.epoch {
            self.epoch = control.epoch();
            self.resync();
        }

        if !control.engaged {
            return self.stepper.set_enabled(false);
        }

        self.stepper.set_enabled(true)?;

        let delta = self.encoder.drain_delta();
        self.follow(delta, control.ratio);

        self.stepper.tick()
    }

    fn resync(&mut self) {
        self.stepper.hold();
        self.carry = 0.0;
        let discarded = self.encoder.drain_delta();

        #[cfg(feature = "defmt")]
        defmt::debug!("Leadscrew resync, discarded {} counts", discarded);
        #[cfg(not(feature = "defmt"))]
        let _ = discarded;
    }

    fn follow(&mut self, delta: i32, ratio: f32) {
        if delta == 0 {
            return;
        }

        let exact = self.carry + delta as f32 * ratio;
        let whole = libm::truncf(exact);
        self.carry = exact - whole;
        self.stepper.advance(whole as i64);
    }

    /// Stepper position snapshot.
    #[inline]
    pub fn position(&self) -> Position {
        self.stepper.position()
    }

    /// Fraction of a step owed but not yet commanded.
    #[inline]
    pub fn carry(&self) -> f32 {
        self.carry
    }

    /// Borrow the stepper.
    pub fn stepper(&self) -> &Stepper<STEP, DIR> {
        &self.stepper
    }

    /// Disable the stepper and return it.
    pub fn release(mut self) -> Result<Stepper<STEP, DIR>> {
        self.stepper.set_enabled(false)?;
        Ok(self.stepper)
    }
}
