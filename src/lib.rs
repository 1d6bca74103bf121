//! # electronic-leadscrew
//!
//! Electronic leadscrew controller for a metal lathe, built on embedded-hal 1.0.
//!
//! A stepper on the leadscrew is slaved to an absolute spindle sensor so the
//! carriage advances a fixed distance per spindle turn, for thread cutting
//! (TPI or metric pitch) or power feed.
//!
//! ## Parts
//!
//! - **Position sensor** ([`Encoder`]): samples a Gray-coded absolute sensor,
//!   unwraps it across the zero crossing and publishes motion counts
//! - **Synchronization** ([`Leadscrew`] + [`LeadscrewHandle`]): turns spindle
//!   counts into stepper targets at the commanded ratio, with engage/disengage
//!   and a watchdog counter
//! - **Actuator** ([`Stepper`]): two-phase STEP/DIR pulse generator, one step
//!   per two control periods at most
//! - **Speed** ([`Tachometer`]): 10-sample moving-average RPM
//!
//! The parts share only lock-free cells ([`SharedState`]), so each can run
//! in its own interrupt, task or thread.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use electronic_leadscrew::{LeadscrewSystem, SharedState};
//!
//! static SHARED: SharedState = SharedState::new();
//!
//! let config = electronic_leadscrew::load_config("lathe.toml")?;
//! let mut system = LeadscrewSystem::new(&config, &SHARED, source, step_pin, dir_pin, clock)?;
//!
//! system.handle.set_thread_tpi(20)?;
//! system.handle.engage(true);
//!
//! loop {
//!     system.encoder.tick()?;
//!     system.leadscrew.tick()?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): TOML file loading and [`StdClock`]
//! - `defmt`: defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Core modules
pub mod config;
pub mod encoder;
pub mod error;
pub mod leadscrew;
pub mod motor;
pub mod shared;
pub mod system;
pub mod tachometer;

// Re-exports for ergonomic API
pub use config::{validate_config, FeedMode, SystemConfig};
pub use encoder::{Encoder, EncoderCounters, PositionSource, SimulatedSource, SpiPositionSource};
pub use error::{Error, Result};
pub use leadscrew::{Leadscrew, LeadscrewHandle, LeadscrewState, Liveness, LivenessProbe, Status};
pub use motor::{Stepper, StepperBuilder};
pub use system::{LeadscrewSystem, SharedState};
pub use tachometer::{Clock, SpeedReading, Tachometer};

#[cfg(feature = "std")]
pub use tachometer::StdClock;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{InchesPerRev, Millimeters, Rpm};
