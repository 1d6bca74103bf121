//! Stepper motor configuration from TOML.

use serde::Deserialize;

/// Leadscrew stepper parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct StepperConfig {
    /// Driver steps per motor revolution, microstepping included.
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: f32,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,
}

fn default_steps_per_revolution() -> f32 {
    2400.0
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            steps_per_revolution: default_steps_per_revolution(),
            invert_direction: false,
        }
    }
}
