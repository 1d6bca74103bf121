//! Position sensor configuration from TOML.

use serde::Deserialize;

/// Spindle position sensor parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct EncoderConfig {
    /// Bits per single-turn code (12 means 4096 codes per revolution).
    #[serde(default = "default_resolution_bits")]
    pub resolution_bits: u8,

    /// Counts the controller treats as one spindle revolution.
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: f32,

    /// Sampling period in microseconds.
    ///
    /// Must be short enough that the spindle never turns half a revolution
    /// between two samples at full speed.
    #[serde(default = "default_update_interval_us")]
    pub update_interval_us: u32,
}

fn default_resolution_bits() -> u8 {
    12
}

fn default_steps_per_revolution() -> f32 {
    4096.0
}

fn default_update_interval_us() -> u32 {
    10
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            resolution_bits: default_resolution_bits(),
            steps_per_revolution: default_steps_per_revolution(),
            update_interval_us: default_update_interval_us(),
        }
    }
}

impl EncoderConfig {
    /// Number of distinct codes per revolution (`2^resolution_bits`).
    pub fn modulus(&self) -> u32 {
        1u32 << self.resolution_bits
    }

    /// Highest spindle speed the sampling rate can follow without aliasing.
    pub fn max_trackable_rpm(&self) -> f32 {
        let half_turn = 0.5;
        let samples_per_minute = 60_000_000.0 / self.update_interval_us as f32;
        half_turn * samples_per_minute
    }
}
