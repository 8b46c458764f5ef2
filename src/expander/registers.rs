//! Register map of the expander device.
//!
//! The device is addressed with a register offset byte followed by data.
//! Offsets follow the MCP23017 layout with `IOCON.BANK = 0`.

use super::row::Row;

/// Default 7-bit bus address of the device (all address straps low).
pub const DEFAULT_ADDRESS: u8 = 0x20;

/// Register offsets used by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Direction of row A (bit set = input).
    IoDirA = 0x00,
    /// Direction of row B (bit set = input).
    IoDirB = 0x01,
    /// Sampled input levels of row A.
    GpioA = 0x12,
    /// Sampled input levels of row B.
    GpioB = 0x13,
    /// Output latch of row A.
    OLatA = 0x14,
    /// Output latch of row B.
    OLatB = 0x15,
}

impl Register {
    /// Direction register for a row.
    #[inline]
    pub const fn direction(row: Row) -> Self {
        match row {
            Row::A => Register::IoDirA,
            Row::B => Register::IoDirB,
        }
    }

    /// Input register for a row.
    #[inline]
    pub const fn input(row: Row) -> Self {
        match row {
            Row::A => Register::GpioA,
            Row::B => Register::GpioB,
        }
    }

    /// Output-latch register for a row.
    #[inline]
    pub const fn output_latch(row: Row) -> Self {
        match row {
            Row::A => Register::OLatA,
            Row::B => Register::OLatB,
        }
    }

    /// Register offset as sent on the wire.
    #[inline]
    pub const fn addr(self) -> u8 {
        self as u8
    }
}
