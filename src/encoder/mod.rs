//! Spindle position sensor.
//!
//! The sensor side is split in two: [`Encoder`] is owned by the fast sampling
//! context and is the only writer, while [`EncoderCounters`] is shared with
//! the synchronization loop (which drains the pending delta) and the
//! tachometer (which reads the cumulative position).

mod counters;
pub mod gray;
mod sensor;
mod simulator;
mod source;

pub use counters::EncoderCounters;
pub use sensor::{wrap_delta, Encoder};
pub use simulator::{SimulatedSource, SpindleDirection};
pub use source::{PositionSource, SpiPositionSource};
