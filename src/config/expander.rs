//! Expander device configuration from TOML.

use serde::Deserialize;

use crate::expander::DEFAULT_ADDRESS;

/// One expander device on an I2C bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ExpanderConfig {
    /// I2C bus number (`/dev/i2c-<bus>` on Linux).
    pub bus: u8,

    /// 7-bit device address.
    #[serde(default = "default_address")]
    pub address: u8,
}

fn default_address() -> u8 {
    DEFAULT_ADDRESS
}
