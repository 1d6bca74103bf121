//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use electronic_leadscrew::load_config;
///
/// let config = load_config("leadscrew.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedMode;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.encoder.resolution_bits, 12);
        assert_eq!(config.stepper.steps_per_revolution, 2400.0);
        assert_eq!(config.leadscrew.defaults.mode, FeedMode::Tpi);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[encoder]
resolution_bits = 14
steps_per_revolution = 16384

[leadscrew.defaults]
mode = "metric"
metric_pitch_mm = 1.25
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.encoder.modulus(), 16384);
        assert_eq!(config.leadscrew.defaults.mode, FeedMode::Metric);
        assert!((config.leadscrew.defaults.metric_pitch.0 - 1.25).abs() < 1e-6);
        // Untouched sections keep their defaults
        assert!((config.leadscrew.reduction_factor - 2.75).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let toml = r#"
[leadscrew]
pitch_tpi = 0.0
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::InvalidLeadscrewPitch(_)))
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = parse_config("[encoder]\nresolution_bits = \"twelve\"");
        assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
    }
}
