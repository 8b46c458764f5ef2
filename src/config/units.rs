//! Unit types for finger positions.

use core::fmt;

use serde::Deserialize;

use crate::error::ConfigError;

/// Finger position as a share of its travel, validated to `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Percent(u8);

impl Percent {
    /// Fully open (home).
    pub const MIN: Self = Self(0);
    /// Fully closed (`max`).
    pub const MAX: Self = Self(100);

    /// Create a new Percent value with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPercent` if the value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ConfigError> {
        if value <= 100 {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidPercent(value))
        }
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// This share of `max`, truncated toward zero.
    #[inline]
    pub fn of(self, max: i64) -> i64 {
        // Widened so that large bounds cannot overflow.
        (i128::from(max) * i128::from(self.0) / 100) as i64
    }
}

impl TryFrom<u8> for Percent {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u8::deserialize(deserializer)?;
        Percent::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}
