//! Unit tests for configuration validation.

use finger_drive::config::{validate_config, HandConfig};
use finger_drive::error::{ConfigError, Error, GestureError};
use finger_drive::Row;

const PALM: &str = r#"
[expanders.palm]
bus = 1
"#;

fn finger(name: &str, row: &str, first_pin: u8, max: i64) -> String {
    let coils: Vec<String> = (first_pin..first_pin + 4)
        .map(|pin| format!("{{ expander = \"palm\", row = \"{}\", pin = {} }}", row, pin))
        .collect();
    format!(
        "[motors.{}]\ncoils = [{}]\nswitch = {{ expander = \"palm\", row = \"{}\", pin = {} }}\nmax = {}\n",
        name,
        coils.join(", "),
        row,
        first_pin + 4,
        max
    )
}

fn parse(parts: &[&str]) -> HandConfig {
    toml::from_str(&parts.concat()).expect("Failed to parse TOML")
}

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config = parse(&[PALM, &finger("index", "a", 0, 1400), &finger("middle", "b", 0, 1400)]);
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a motor on an unknown expander.
#[test]
fn test_unknown_expander() {
    let config = parse(&[&finger("index", "a", 0, 1400)]);
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::ExpanderNotFound { .. }))
    ));
}

/// Test validation fails when two motors share a pin.
#[test]
fn test_duplicate_pin() {
    // index uses a0-a4, middle a3-a7.
    let config = parse(&[PALM, &finger("index", "a", 0, 1400), &finger("middle", "a", 3, 1400)]);
    match validate_config(&config) {
        Err(Error::Config(ConfigError::DuplicatePin { row, pin, .. })) => {
            assert_eq!(row, Row::A);
            assert_eq!(pin, 3);
        }
        other => panic!("expected DuplicatePin, got {:?}", other),
    }
}

/// Test validation fails for two devices at one address.
#[test]
fn test_duplicate_device() {
    let config = parse(&[PALM, "[expanders.wrist]\nbus = 1\naddress = 0x20\n"]);
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::DuplicateDevice {
            bus: 1,
            address: 0x20
        }))
    );
}

/// Test validation fails for empty travel.
#[test]
fn test_invalid_bounds() {
    let config = parse(&[PALM, &finger("index", "a", 0, 0)]);
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidBounds { min: 0, max: 0, .. }))
    ));
}

/// Test validation fails for an empty gesture.
#[test]
fn test_empty_gesture() {
    let config = parse(&[PALM, &finger("index", "a", 0, 1400), "[gestures.idle]\nposes = []\n"]);
    assert!(matches!(
        validate_config(&config),
        Err(Error::Gesture(GestureError::Empty(_)))
    ));
}
