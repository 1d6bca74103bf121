//! Power-feed limits.

use serde::Deserialize;

use super::units::InchesPerRev;

/// Allowed power-feed range in inches per revolution.
///
/// Requests outside the range are clamped to the nearest bound, never
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FeedLimits {
    /// Slowest allowed feed.
    #[serde(rename = "min_ipr", default = "default_min")]
    pub min: InchesPerRev,

    /// Fastest allowed feed.
    #[serde(rename = "max_ipr", default = "default_max")]
    pub max: InchesPerRev,
}

fn default_min() -> InchesPerRev {
    InchesPerRev(0.001)
}

fn default_max() -> InchesPerRev {
    InchesPerRev(0.100)
}

impl Default for FeedLimits {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
        }
    }
}

impl FeedLimits {
    /// Create new feed limits.
    pub fn new(min: InchesPerRev, max: InchesPerRev) -> Self {
        Self { min, max }
    }

    /// Check if limits are valid (0 < min < max).
    pub fn is_valid(&self) -> bool {
        self.min.0 > 0.0 && self.min.0 < self.max.0
    }

    /// Clamp a requested feed into the allowed range.
    pub fn apply(&self, feed: InchesPerRev) -> InchesPerRev {
        if feed.0 < self.min.0 {
            self.min
        } else if feed.0 > self.max.0 {
            self.max
        } else {
            feed
        }
    }
}
