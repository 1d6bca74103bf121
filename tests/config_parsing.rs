//! TOML configuration parsing and loading.

use electronic_leadscrew::config::{load_config, parse_config, FeedMode, SystemConfig};
use electronic_leadscrew::error::{ConfigError, Error};

const FULL_CONFIG: &str = r#"
[encoder]
resolution_bits = 12
steps_per_revolution = 4096
update_interval_us = 10

[stepper]
steps_per_revolution = 1600
invert_direction = true

[leadscrew]
pitch_tpi = 12
reduction_factor = 2.0

[leadscrew.feed_limits]
min_ipr = 0.002
max_ipr = 0.05

[leadscrew.defaults]
mode = "feed"
tpi = 20
metric_pitch_mm = 1.5
feed_ipr = 0.004

[tachometer]
update_interval_us = 20000
"#;

/// Every field set explicitly.
#[test]
fn test_parse_full_config() {
    let config = parse_config(FULL_CONFIG).expect("Failed to parse TOML");

    assert_eq!(config.encoder.resolution_bits, 12);
    assert_eq!(config.encoder.steps_per_revolution, 4096.0);
    assert_eq!(config.encoder.update_interval_us, 10);

    assert_eq!(config.stepper.steps_per_revolution, 1600.0);
    assert!(config.stepper.invert_direction);

    assert_eq!(config.leadscrew.pitch_tpi, 12.0);
    assert_eq!(config.leadscrew.reduction_factor, 2.0);
    assert!((config.leadscrew.feed_limits.min.0 - 0.002).abs() < 1e-7);
    assert!((config.leadscrew.feed_limits.max.0 - 0.05).abs() < 1e-7);

    let defaults = &config.leadscrew.defaults;
    assert_eq!(defaults.mode, FeedMode::Feed);
    assert_eq!(defaults.tpi, 20);
    assert!((defaults.metric_pitch.0 - 1.5).abs() < 1e-7);
    assert!((defaults.feed.0 - 0.004).abs() < 1e-7);

    assert_eq!(config.tachometer.update_interval_us, 20_000);
}

/// Missing sections fall back to the reference build.
#[test]
fn test_empty_config_uses_defaults() {
    let config = parse_config("").unwrap();
    let defaults = SystemConfig::default();

    assert_eq!(config.encoder.modulus(), 4096);
    assert_eq!(config.stepper.steps_per_revolution, defaults.stepper.steps_per_revolution);
    assert_eq!(config.leadscrew.pitch_tpi, 8.0);
    assert_eq!(config.leadscrew.defaults.tpi, 16);
    assert_eq!(config.tachometer.update_interval_us, 10_000);
}

#[test]
fn test_unknown_mode_is_parse_error() {
    let toml = r#"
[leadscrew.defaults]
mode = "knurling"
"#;

    assert!(matches!(
        parse_config(toml),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

#[test]
fn test_zero_interval_rejected() {
    let toml = r#"
[tachometer]
update_interval_us = 0
"#;

    assert!(matches!(
        parse_config(toml),
        Err(Error::Config(ConfigError::InvalidInterval(0)))
    ));
}

#[test]
fn test_oversized_resolution_rejected() {
    let toml = r#"
[encoder]
resolution_bits = 32
"#;

    assert!(matches!(
        parse_config(toml),
        Err(Error::Config(ConfigError::InvalidResolution(32)))
    ));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("leadscrew-{}.toml", std::process::id()));
    std::fs::write(&path, FULL_CONFIG).unwrap();

    let config = load_config(&path);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.unwrap().stepper.steps_per_revolution, 1600.0);
}

#[test]
fn test_missing_file_is_io_error() {
    let result = load_config("/nonexistent/leadscrew.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}
