//! Motor configuration from TOML.

use serde::Deserialize;

use crate::motor::{DEFAULT_DELAY_US, DEFAULT_STEPS_PER_REVOLUTION};

use super::pin::PinRef;

/// Wiring and travel of one finger motor.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Coil outputs, in phase-table column order.
    pub coils: [PinRef; 4],

    /// Home switch input.
    pub switch: PinRef,

    /// Lower travel bound in partial steps.
    #[serde(default)]
    pub min: i64,

    /// Upper travel bound in partial steps (100%).
    pub max: i64,

    /// Pause after each partial step in microseconds.
    #[serde(default = "default_delay_us")]
    pub delay_us: u32,

    /// Full steps per revolution.
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: u16,

    /// Give up homing after this many backward partial steps.
    #[serde(default)]
    pub homing_max_steps: Option<u32>,

    /// Switch reads low when pressed (pull-up wiring).
    #[serde(default)]
    pub switch_active_low: bool,

    /// Discard the first switch read after setup.
    #[serde(default)]
    pub settle_read: bool,

    /// Stop bursts early when the switch trips away from home.
    #[serde(default)]
    pub end_stop_guard: bool,
}

fn default_delay_us() -> u32 {
    DEFAULT_DELAY_US
}

fn default_steps_per_revolution() -> u16 {
    DEFAULT_STEPS_PER_REVOLUTION
}

impl MotorConfig {
    /// Every pin this motor uses, coils first.
    pub fn pins(&self) -> impl Iterator<Item = &PinRef> {
        self.coils.iter().chain(core::iter::once(&self.switch))
    }
}
