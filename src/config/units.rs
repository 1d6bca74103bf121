//! Unit types for physical quantities.
//!
//! Thread pitches, feed rates and spindle speeds all travel as `f32`, so the
//! newtypes keep a metric pitch from being passed where a feed rate belongs.

use serde::Deserialize;

/// Millimeters per thread (metric thread pitch).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f32);

impl Millimeters {
    /// Millimeters in one inch.
    pub const PER_INCH: f32 = 25.4;

    /// Create a new Millimeters value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Equivalent thread count per inch.
    #[inline]
    pub fn to_tpi(self) -> f32 {
        Self::PER_INCH / self.0
    }

    /// Pitch of a thread with the given count per inch.
    #[inline]
    pub fn from_tpi(tpi: f32) -> Self {
        Self(Self::PER_INCH / tpi)
    }
}

/// Carriage feed in inches per spindle revolution.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct InchesPerRev(pub f32);

impl InchesPerRev {
    /// Create a new InchesPerRev value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Spindle speed in revolutions per minute.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Rpm(pub f32);

impl Rpm {
    /// Create a new Rpm value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}
