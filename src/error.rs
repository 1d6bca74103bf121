//! Error types for the leadscrew controller.
//!
//! The periodic ticks only fail on hardware I/O. Everything else either
//! succeeds, is clamped, or is rejected up front by a setter or by config
//! validation.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all leadscrew operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Stepper output error
    Motor(MotorError),
    /// Position sensor error
    Encoder(EncoderError),
    /// Rejected ratio command
    Ratio(RatioError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Sensor resolution outside 1..=24 bits
    InvalidResolution(u8),
    /// Steps per revolution must be > 0
    InvalidStepsPerRevolution(f32),
    /// Leadscrew pitch must be > 0 TPI
    InvalidLeadscrewPitch(f32),
    /// Reduction factor must be > 0
    InvalidReductionFactor(f32),
    /// Feed limits must satisfy 0 < min < max
    InvalidFeedLimits {
        /// Minimum feed in inches per revolution
        min: f32,
        /// Maximum feed in inches per revolution
        max: f32,
    },
    /// Tick interval must be > 0
    InvalidInterval(u32),
    /// Startup default rejected by the ratio setters
    InvalidDefault(RatioError),
    /// Builder is missing a required field
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Stepper output errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// STEP or DIR pin operation failed
    PinError,
}

/// Position sensor errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderError {
    /// Bus transfer with the sensor failed
    Bus,
}

/// Ratio command errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatioError {
    /// Thread pitch of zero TPI
    ZeroTpi,
    /// Metric pitch is not a positive finite length
    InvalidPitch(f32),
    /// Feed rate is not a finite number
    InvalidFeed(f32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Encoder(e) => write!(f, "Encoder error: {}", e),
            Error::Ratio(e) => write!(f, "Ratio error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidResolution(bits) => {
                write!(f, "Invalid encoder resolution: {} bits. Must be 1-24", bits)
            }
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidLeadscrewPitch(v) => {
                write!(f, "Invalid leadscrew pitch: {} TPI. Must be > 0", v)
            }
            ConfigError::InvalidReductionFactor(v) => {
                write!(f, "Invalid reduction factor: {}. Must be > 0", v)
            }
            ConfigError::InvalidFeedLimits { min, max } => {
                write!(f, "Invalid feed limits: need 0 < min ({}) < max ({})", min, max)
            }
            ConfigError::InvalidInterval(v) => write!(f, "Invalid tick interval: {} us", v),
            ConfigError::InvalidDefault(e) => write!(f, "Invalid startup default: {}", e),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

impl fmt::Display for EncoderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncoderError::Bus => write!(f, "sensor bus transfer failed"),
        }
    }
}

impl fmt::Display for RatioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioError::ZeroTpi => write!(f, "thread pitch of 0 TPI"),
            RatioError::InvalidPitch(v) => write!(f, "invalid metric pitch: {} mm", v),
            RatioError::InvalidFeed(v) => write!(f, "invalid feed rate: {} in/rev", v),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<EncoderError> for Error {
    fn from(e: EncoderError) -> Self {
        Error::Encoder(e)
    }
}

impl From<RatioError> for Error {
    fn from(e: RatioError) -> Self {
        Error::Ratio(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for EncoderError {}

#[cfg(feature = "std")]
impl std::error::Error for RatioError {}
