//! Leadscrew drivetrain and startup configuration from TOML.

use serde::Deserialize;

use super::limits::FeedLimits;
use super::units::{InchesPerRev, Millimeters};

/// What the synchronization ratio currently represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum FeedMode {
    /// Imperial thread, set in threads per inch.
    #[default]
    Tpi,
    /// Metric thread, set in millimeters of pitch.
    Metric,
    /// Power feed, set in inches per revolution.
    Feed,
}

/// Mechanical link between the stepper and the carriage.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadscrewConfig {
    /// Leadscrew pitch in threads per inch.
    #[serde(default = "default_pitch_tpi")]
    pub pitch_tpi: f32,

    /// Stepper revolutions per leadscrew revolution (2.75 means 2.75:1).
    #[serde(default = "default_reduction_factor")]
    pub reduction_factor: f32,

    /// Power-feed range.
    #[serde(default)]
    pub feed_limits: FeedLimits,

    /// Ratio applied at startup.
    #[serde(default)]
    pub defaults: LeadscrewDefaults,
}

fn default_pitch_tpi() -> f32 {
    8.0
}

fn default_reduction_factor() -> f32 {
    2.75
}

impl Default for LeadscrewConfig {
    fn default() -> Self {
        Self {
            pitch_tpi: default_pitch_tpi(),
            reduction_factor: default_reduction_factor(),
            feed_limits: FeedLimits::default(),
            defaults: LeadscrewDefaults::default(),
        }
    }
}

/// Startup mode and the value preloaded for it.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadscrewDefaults {
    /// Mode selected at power-up.
    #[serde(default)]
    pub mode: FeedMode,

    /// Imperial thread in TPI.
    #[serde(default = "default_tpi")]
    pub tpi: u16,

    /// Metric thread pitch.
    #[serde(rename = "metric_pitch_mm", default = "default_metric_pitch")]
    pub metric_pitch: Millimeters,

    /// Power feed rate.
    #[serde(rename = "feed_ipr", default = "default_feed")]
    pub feed: InchesPerRev,
}

fn default_tpi() -> u16 {
    16
}

fn default_metric_pitch() -> Millimeters {
    Millimeters(1.0)
}

fn default_feed() -> InchesPerRev {
    InchesPerRev(0.005)
}

impl Default for LeadscrewDefaults {
    fn default() -> Self {
        Self {
            mode: FeedMode::default(),
            tpi: default_tpi(),
            metric_pitch: default_metric_pitch(),
            feed: default_feed(),
        }
    }
}
