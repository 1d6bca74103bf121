//! Configuration module for the leadscrew controller.
//!
//! Provides types for loading and validating sensor, stepper and drivetrain
//! configuration from TOML files (with `std` feature) or pre-built values.

mod encoder;
mod leadscrew;
mod limits;
#[cfg(feature = "std")]
mod loader;
mod stepper;
mod system;
pub mod units;
mod validation;

pub use encoder::EncoderConfig;
pub use leadscrew::{FeedMode, LeadscrewConfig, LeadscrewDefaults};
pub use limits::FeedLimits;
pub use stepper::StepperConfig;
pub use system::{SystemConfig, TachometerConfig};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{InchesPerRev, Millimeters, Rpm};
