//! System configuration - root configuration structure.

use serde::Deserialize;

use super::encoder::EncoderConfig;
use super::leadscrew::LeadscrewConfig;
use super::stepper::StepperConfig;

/// Root configuration structure from TOML.
///
/// Every section is optional; a missing section takes the defaults of the
/// reference build (12-bit sensor, 2400-step motor, 8 TPI screw at 2.75:1).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemConfig {
    /// Spindle position sensor.
    #[serde(default)]
    pub encoder: EncoderConfig,

    /// Leadscrew stepper.
    #[serde(default)]
    pub stepper: StepperConfig,

    /// Drivetrain and startup ratio.
    #[serde(default)]
    pub leadscrew: LeadscrewConfig,

    /// Speed estimation.
    #[serde(default)]
    pub tachometer: TachometerConfig,
}

/// Speed estimator parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct TachometerConfig {
    /// Estimation period in microseconds.
    #[serde(default = "default_update_interval_us")]
    pub update_interval_us: u32,
}

fn default_update_interval_us() -> u32 {
    10_000
}

impl Default for TachometerConfig {
    fn default() -> Self {
        Self {
            update_interval_us: default_update_interval_us(),
        }
    }
}
