//! Motor module.
//!
//! Provides the step/direction pulse generator and its position tracking.

mod builder;
mod driver;
mod position;
#[cfg(test)]
pub(crate) mod test_pin;

pub use builder::StepperBuilder;
pub use driver::Stepper;
pub use position::{Direction, Position};
