//! Row, pin and per-row bit vector types.
//!
//! A device has exactly two 8-pin rows. Every register on every row uses the
//! same bit order: bit `i` carries pin `i`.

use core::fmt;

use serde::Deserialize;

use crate::error::ExpanderError;

/// Number of pins on one row.
pub const PINS_PER_ROW: usize = 8;

/// One of the two 8-bit ports of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Row {
    /// Port A.
    #[serde(rename = "a", alias = "A")]
    A,
    /// Port B.
    #[serde(rename = "b", alias = "B")]
    B,
}

impl Row {
    /// Both rows, in register order.
    pub const ALL: [Row; 2] = [Row::A, Row::B];

    /// Zero-based row index.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Row::A => 0,
            Row::B => 1,
        }
    }

    /// Lowercase row letter.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Row::A => 'a',
            Row::B => 'b',
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Row::A => f.write_str("A"),
            Row::B => f.write_str("B"),
        }
    }
}

impl TryFrom<u8> for Row {
    type Error = ExpanderError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Row::A),
            1 => Ok(Row::B),
            other => Err(ExpanderError::InvalidRow(other)),
        }
    }
}

impl TryFrom<char> for Row {
    type Error = ExpanderError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'a' | 'A' => Ok(Row::A),
            'b' | 'B' => Ok(Row::B),
            other => Err(ExpanderError::InvalidRow(
                u8::try_from(u32::from(other)).unwrap_or(u8::MAX),
            )),
        }
    }
}

/// Index of a pin within a row, validated to `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinIndex(u8);

impl PinIndex {
    /// Create a pin index.
    ///
    /// # Errors
    ///
    /// Returns `ExpanderError::InvalidPin` if `index` is not in `0..8`.
    pub const fn new(index: u8) -> Result<Self, ExpanderError> {
        if (index as usize) < PINS_PER_ROW {
            Ok(Self(index))
        } else {
            Err(ExpanderError::InvalidPin(index))
        }
    }

    /// Raw index.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Single-bit mask selecting this pin in a row register.
    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self.0
    }

    /// All eight pins of a row, in bit order.
    pub fn all() -> impl Iterator<Item = PinIndex> {
        (0..PINS_PER_ROW as u8).map(PinIndex)
    }
}

impl TryFrom<u8> for PinIndex {
    type Error = ExpanderError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for PinIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for PinIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u8::deserialize(deserializer)?;
        PinIndex::new(value).map_err(|e| {
            let mut buf = heapless::String::<64>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}

/// Role of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Driven by the device (direction bit 0).
    #[default]
    Output,
    /// Sampled by the device (direction bit 1).
    Input,
}

impl Direction {
    /// Direction register bit for this role.
    #[inline]
    pub const fn bit(self) -> bool {
        matches!(self, Direction::Input)
    }

    /// Role selected by a direction register bit.
    #[inline]
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Direction::Input
        } else {
            Direction::Output
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Output => f.write_str("output"),
            Direction::Input => f.write_str("input"),
        }
    }
}

/// Eight per-pin bits of one row, indexed by pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinVector([bool; PINS_PER_ROW]);

impl PinVector {
    /// All bits clear.
    pub const CLEAR: Self = Self([false; PINS_PER_ROW]);

    /// Create from per-pin bits.
    #[inline]
    pub const fn new(bits: [bool; PINS_PER_ROW]) -> Self {
        Self(bits)
    }

    /// Bit for one pin.
    #[inline]
    pub const fn get(&self, pin: PinIndex) -> bool {
        self.0[pin.0 as usize]
    }

    /// Set the bit for one pin.
    #[inline]
    pub fn set(&mut self, pin: PinIndex, bit: bool) {
        self.0[pin.0 as usize] = bit;
    }

    /// Per-pin bits.
    #[inline]
    pub const fn bits(&self) -> [bool; PINS_PER_ROW] {
        self.0
    }

    /// Pack into a register byte, bit `i` = pin `i`.
    pub fn pack(&self) -> u8 {
        self.0
            .iter()
            .enumerate()
            .fold(0u8, |byte, (i, &bit)| byte | (u8::from(bit) << i))
    }

    /// Unpack a register byte, bit `i` = pin `i`.
    pub fn unpack(byte: u8) -> Self {
        let mut bits = [false; PINS_PER_ROW];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = byte & (1 << i) != 0;
        }
        Self(bits)
    }
}

/// Cached state of one row: direction and value vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowState {
    /// Direction vector (bit set = input).
    pub directions: PinVector,
    /// Last commanded level for outputs, last sampled level for inputs.
    pub values: PinVector,
}

impl RowState {
    /// Direction of one pin.
    #[inline]
    pub fn direction(&self, pin: PinIndex) -> Direction {
        Direction::from_bit(self.directions.get(pin))
    }

    /// Adopt sampled input levels for pins configured as inputs in
    /// `directions`; output entries keep their last written value.
    pub fn adopt_inputs(&mut self, directions: PinVector, sampled: PinVector) {
        for pin in PinIndex::all() {
            if directions.get(pin) {
                self.values.set(pin, sampled.get(pin));
            }
        }
    }
}
