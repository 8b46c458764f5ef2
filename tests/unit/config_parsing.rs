//! Unit tests for configuration parsing.

use finger_drive::config::{HandConfig, Percent};
use finger_drive::expander::DEFAULT_ADDRESS;
use finger_drive::{PinIndex, Row};

/// Test that a fully specified motor parses every field.
#[test]
fn test_parse_full_motor() {
    let toml_str = r#"
[expanders.wrist]
bus = 1
address = 0x23

[motors.thumb]
coils = [
    { expander = "wrist", row = "b", pin = 7 },
    { expander = "wrist", row = "b", pin = 6 },
    { expander = "wrist", row = "b", pin = 5 },
    { expander = "wrist", row = "B", pin = 4 },
]
switch = { expander = "wrist", row = "a", pin = 0 }
min = -40
max = 1200
delay_us = 800
steps_per_revolution = 2048
homing_max_steps = 8192
switch_active_low = true
settle_read = true
end_stop_guard = true
"#;

    let config: HandConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let wrist = config.expander("wrist").unwrap();
    assert_eq!(wrist.bus, 1);
    assert_eq!(wrist.address, 0x23);

    let thumb = config.motor("thumb").unwrap();
    assert_eq!(thumb.coils[0].row, Row::B);
    assert_eq!(thumb.coils[0].pin, PinIndex::new(7).unwrap());
    assert_eq!(thumb.coils[3].row, Row::B);
    assert_eq!(thumb.switch.row, Row::A);
    assert_eq!(thumb.min, -40);
    assert_eq!(thumb.max, 1200);
    assert_eq!(thumb.delay_us, 800);
    assert_eq!(thumb.steps_per_revolution, 2048);
    assert_eq!(thumb.homing_max_steps, Some(8192));
    assert!(thumb.switch_active_low);
    assert!(thumb.settle_read);
    assert!(thumb.end_stop_guard);
}

/// Test defaults for optional fields.
#[test]
fn test_defaults() {
    let toml_str = r#"
[expanders.palm]
bus = 1

[motors.ring]
coils = [
    { expander = "palm", row = "a", pin = 0 },
    { expander = "palm", row = "a", pin = 1 },
    { expander = "palm", row = "a", pin = 2 },
    { expander = "palm", row = "a", pin = 3 },
]
switch = { expander = "palm", row = "a", pin = 4 }
max = 1400
"#;

    let config: HandConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(config.expander("palm").unwrap().address, DEFAULT_ADDRESS);

    let ring = config.motor("ring").unwrap();
    assert_eq!(ring.min, 0);
    assert_eq!(ring.delay_us, 1000);
    assert_eq!(ring.steps_per_revolution, 512);
    assert_eq!(ring.homing_max_steps, None);
    assert!(!ring.switch_active_low);
    assert!(!ring.settle_read);
    assert!(!ring.end_stop_guard);
    assert!(config.gestures.is_empty());
}

/// Test that pin indices are validated while parsing.
#[test]
fn test_pin_out_of_range() {
    let toml_str = r#"
[expanders.palm]
bus = 1

[motors.ring]
coils = [
    { expander = "palm", row = "a", pin = 0 },
    { expander = "palm", row = "a", pin = 1 },
    { expander = "palm", row = "a", pin = 2 },
    { expander = "palm", row = "a", pin = 8 },
]
switch = { expander = "palm", row = "a", pin = 4 }
max = 1400
"#;

    let result: Result<HandConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test that an unknown row letter is rejected.
#[test]
fn test_row_out_of_range() {
    let toml_str = r#"
[expanders.palm]
bus = 1

[motors.ring]
coils = [
    { expander = "palm", row = "c", pin = 0 },
    { expander = "palm", row = "a", pin = 1 },
    { expander = "palm", row = "a", pin = 2 },
    { expander = "palm", row = "a", pin = 3 },
]
switch = { expander = "palm", row = "a", pin = 4 }
max = 1400
"#;

    let result: Result<HandConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test gesture poses keep their order and targets.
#[test]
fn test_gesture_poses() {
    let toml_str = r#"
[expanders.palm]
bus = 1

[motors.ring]
coils = [
    { expander = "palm", row = "a", pin = 0 },
    { expander = "palm", row = "a", pin = 1 },
    { expander = "palm", row = "a", pin = 2 },
    { expander = "palm", row = "a", pin = 3 },
]
switch = { expander = "palm", row = "a", pin = 4 }
max = 1400

[gestures.tap]
poses = [{ ring = 60 }, { ring = 0 }, { ring = 60 }]
"#;

    let config: HandConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let tap = config.gesture("tap").unwrap();
    let targets: Vec<Percent> = tap
        .poses
        .iter()
        .map(|pose| *pose.values().next().unwrap())
        .collect();
    assert_eq!(
        targets,
        [Percent::new(60).unwrap(), Percent::MIN, Percent::new(60).unwrap()]
    );
}
