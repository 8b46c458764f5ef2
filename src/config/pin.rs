//! References to physical expander pins.

use core::fmt;

use heapless::String;
use serde::Deserialize;

use crate::expander::{PinIndex, Row};

/// One pin of one row of a named expander.
///
/// Written inline in TOML as `{ expander = "palm", row = "a", pin = 3 }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct PinRef {
    /// Name of the expander in `[expanders]`.
    pub expander: String<32>,

    /// Row on that expander.
    pub row: Row,

    /// Pin within the row (0-7).
    pub pin: PinIndex,
}

impl PinRef {
    /// Whether both references name the same physical pin.
    pub fn same_pin(&self, other: &PinRef) -> bool {
        self.expander == other.expander && self.row == other.row && self.pin == other.pin
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.expander, self.row, self.pin)
    }
}
