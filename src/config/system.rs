//! Hand configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::expander::{Direction, PinVector};

use super::expander::ExpanderConfig;
use super::gesture::GestureConfig;
use super::motor::MotorConfig;

/// Direction vectors for both rows of each configured expander.
pub type DirectionPlan = FnvIndexMap<String<32>, [PinVector; 2], 8>;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HandConfig {
    /// Named expander devices.
    pub expanders: FnvIndexMap<String<32>, ExpanderConfig, 8>,

    /// Finger motors, keyed by finger name.
    pub motors: FnvIndexMap<String<32>, MotorConfig, 8>,

    /// Named gestures.
    #[serde(default)]
    pub gestures: FnvIndexMap<String<32>, GestureConfig, 16>,
}

impl HandConfig {
    /// Get an expander configuration by name.
    pub fn expander(&self, name: &str) -> Option<&ExpanderConfig> {
        self.expanders
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a motor configuration by finger name.
    pub fn motor(&self, name: &str) -> Option<&MotorConfig> {
        self.motors
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a gesture configuration by name.
    pub fn gesture(&self, name: &str) -> Option<&GestureConfig> {
        self.gestures
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all expander names.
    pub fn expander_names(&self) -> impl Iterator<Item = &str> {
        self.expanders.keys().map(|s| s.as_str())
    }

    /// List all finger names.
    pub fn motor_names(&self) -> impl Iterator<Item = &str> {
        self.motors.keys().map(|s| s.as_str())
    }

    /// List all gesture names.
    pub fn gesture_names(&self) -> impl Iterator<Item = &str> {
        self.gestures.keys().map(|s| s.as_str())
    }

    /// Pin directions each expander must be configured with.
    ///
    /// Switch pins are inputs; every other pin, wired or not, is an output.
    /// Pins on expanders missing from `[expanders]` are skipped, which
    /// [`validate_config`](super::validate_config) reports separately.
    pub fn direction_plan(&self) -> DirectionPlan {
        let mut plan = DirectionPlan::new();
        for name in self.expanders.keys() {
            // Capacities match, so this cannot overflow.
            let _ = plan.insert(name.clone(), [PinVector::CLEAR; 2]);
        }

        for motor in self.motors.values() {
            let switch = &motor.switch;
            if let Some(rows) = plan.get_mut(&switch.expander) {
                rows[switch.row.index()].set(switch.pin, Direction::Input.bit());
            }
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expander::{PinIndex, Row};

    #[cfg(feature = "std")]
    #[test]
    fn test_direction_plan_marks_switches() {
        let config: HandConfig = toml::from_str(
            r#"
[expanders.palm]
bus = 1

[expanders.wrist]
bus = 1
address = 0x21

[motors.thumb]
coils = [
    { expander = "palm", row = "a", pin = 0 },
    { expander = "palm", row = "a", pin = 1 },
    { expander = "palm", row = "a", pin = 2 },
    { expander = "palm", row = "a", pin = 3 },
]
switch = { expander = "palm", row = "a", pin = 4 }
max = 1400
"#,
        )
        .unwrap();

        let plan = config.direction_plan();
        let palm = plan.get(&String::try_from("palm").unwrap()).unwrap();
        assert_eq!(palm[Row::A.index()].pack(), 0b0001_0000);
        assert_eq!(palm[Row::B.index()].pack(), 0);

        let wrist = plan.get(&String::try_from("wrist").unwrap()).unwrap();
        assert_eq!(wrist, &[PinVector::CLEAR; 2]);
        assert!(!palm[0].get(PinIndex::new(0).unwrap()));
    }
}
