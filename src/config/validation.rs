//! Configuration validation.

use crate::error::{ConfigError, Error, RatioError, Result};

use super::{EncoderConfig, LeadscrewConfig, StepperConfig, SystemConfig};

/// Widest single-turn code the 3-byte sensor frame can carry.
const MAX_RESOLUTION_BITS: u8 = 24;

/// Validate a system configuration.
///
/// Checks:
/// - Sensor resolution fits the sensor frame
/// - Steps per revolution, leadscrew pitch and reduction are positive
/// - Feed limits satisfy 0 < min < max
/// - Startup defaults are acceptable to the ratio setters
/// - Tick intervals are non-zero
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    let result = validate_sections(config);

    #[cfg(feature = "defmt")]
    {
        if let Err(e) = &result {
            defmt::error!("Invalid configuration: {}", defmt::Display2Format(e));
        }
    }

    result
}

fn validate_sections(config: &SystemConfig) -> Result<()> {
    validate_encoder(&config.encoder)?;
    validate_stepper(&config.stepper)?;
    validate_leadscrew(&config.leadscrew)?;

    if config.tachometer.update_interval_us == 0 {
        return Err(Error::Config(ConfigError::InvalidInterval(0)));
    }

    Ok(())
}

fn validate_encoder(config: &EncoderConfig) -> Result<()> {
    if config.resolution_bits == 0 || config.resolution_bits > MAX_RESOLUTION_BITS {
        return Err(Error::Config(ConfigError::InvalidResolution(
            config.resolution_bits,
        )));
    }

    // Written as a negated comparison so NaN is rejected too
    if !(config.steps_per_revolution > 0.0) {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.steps_per_revolution,
        )));
    }

    if config.update_interval_us == 0 {
        return Err(Error::Config(ConfigError::InvalidInterval(0)));
    }

    Ok(())
}

fn validate_stepper(config: &StepperConfig) -> Result<()> {
    if !(config.steps_per_revolution > 0.0) {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.steps_per_revolution,
        )));
    }

    Ok(())
}

fn validate_leadscrew(config: &LeadscrewConfig) -> Result<()> {
    if !(config.pitch_tpi > 0.0) {
        return Err(Error::Config(ConfigError::InvalidLeadscrewPitch(
            config.pitch_tpi,
        )));
    }

    if !(config.reduction_factor > 0.0) {
        return Err(Error::Config(ConfigError::InvalidReductionFactor(
            config.reduction_factor,
        )));
    }

    let limits = &config.feed_limits;
    if !limits.is_valid() {
        return Err(Error::Config(ConfigError::InvalidFeedLimits {
            min: limits.min.0,
            max: limits.max.0,
        }));
    }

    let defaults = &config.defaults;
    if defaults.tpi == 0 {
        return Err(Error::Config(ConfigError::InvalidDefault(RatioError::ZeroTpi)));
    }

    let pitch = defaults.metric_pitch.0;
    if !(pitch > 0.0) || !pitch.is_finite() {
        return Err(Error::Config(ConfigError::InvalidDefault(
            RatioError::InvalidPitch(pitch),
        )));
    }

    if !defaults.feed.0.is_finite() {
        return Err(Error::Config(ConfigError::InvalidDefault(
            RatioError::InvalidFeed(defaults.feed.0),
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::InchesPerRev;
    use crate::config::FeedLimits;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SystemConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_resolution() {
        let mut config = SystemConfig::default();
        config.encoder.resolution_bits = 25;

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidResolution(25)))
        ));
    }

    #[test]
    fn test_nan_steps_rejected() {
        let mut config = SystemConfig::default();
        config.stepper.steps_per_revolution = f32::NAN;

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidStepsPerRevolution(_)))
        ));
    }

    #[test]
    fn test_inverted_feed_limits() {
        let mut config = SystemConfig::default();
        config.leadscrew.feed_limits = FeedLimits::new(InchesPerRev(0.1), InchesPerRev(0.001));

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidFeedLimits { .. }))
        ));
    }

    #[test]
    fn test_zero_default_tpi() {
        let mut config = SystemConfig::default();
        config.leadscrew.defaults.tpi = 0;

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidDefault(RatioError::ZeroTpi)))
        ));
    }
}
