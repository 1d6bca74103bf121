//! Spindle-to-leadscrew synchronization.
//!
//! [`Leadscrew`] is the control-loop half; [`LeadscrewHandle`] is the UI half.
//! They communicate only through [`LeadscrewState`].

mod engine;
mod handle;
mod liveness;
mod ratio;
mod state;

pub use engine::Leadscrew;
pub use handle::{LeadscrewHandle, Status};
pub use liveness::{Liveness, LivenessProbe};
pub use ratio::RatioCalculator;
pub use state::{ControlWord, LeadscrewState};
