//! Shared test doubles.
//!
//! `SimBus` is a register-file model of one or more two-row expanders on a
//! single I2C bus. `NullCoil` and `ScriptedSwitch` stand in for direct GPIO.

#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::i2c::{self, I2c, Operation};
use finger_drive::expander::Register;
use finger_drive::Row;

const GPIO_A: usize = Register::GpioA as usize;
const GPIO_B: usize = Register::GpioB as usize;
const OLAT_A: usize = Register::OLatA as usize;
const OLAT_B: usize = Register::OLatB as usize;

#[derive(Debug, Default)]
struct Device {
    regs: [u8; 0x16],
    input_reads: [u32; 2],
    latch_writes: [u32; 2],
    /// (row, pin, read index from which the pin reads high)
    triggers: Vec<(Row, u8, u32)>,
}

impl Device {
    fn write(&mut self, reg: usize, byte: u8) {
        if let Some(slot) = self.regs.get_mut(reg) {
            *slot = byte;
        }
        match reg {
            OLAT_A => self.latch_writes[0] += 1,
            OLAT_B => self.latch_writes[1] += 1,
            _ => {}
        }
    }

    fn read(&mut self, reg: usize) -> u8 {
        let mut byte = self.regs.get(reg).copied().unwrap_or(0);
        let row = match reg {
            GPIO_A => Row::A,
            GPIO_B => Row::B,
            _ => return byte,
        };

        let n = self.input_reads[row.index()];
        self.input_reads[row.index()] += 1;
        for &(r, pin, from) in &self.triggers {
            if r == row && n >= from {
                byte |= 1 << pin;
            }
        }
        byte
    }
}

/// Register-file I2C bus. Clones share the same devices.
#[derive(Debug, Clone, Default)]
pub struct SimBus {
    devices: Arc<Mutex<HashMap<u8, Device>>>,
}

impl SimBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `pin` read high from the `reads`-th input read of its row onward.
    pub fn press_after(&self, address: u8, row: Row, pin: u8, reads: u32) {
        self.with(address, |d| d.triggers.push((row, pin, reads)));
    }

    /// Current value of a device register.
    pub fn register(&self, address: u8, register: Register) -> u8 {
        self.with(address, |d| d.regs[register.addr() as usize])
    }

    /// Number of output-latch commits to a row.
    pub fn latch_writes(&self, address: u8, row: Row) -> u32 {
        self.with(address, |d| d.latch_writes[row.index()])
    }

    /// Number of input-register refreshes of a row.
    pub fn input_reads(&self, address: u8, row: Row) -> u32 {
        self.with(address, |d| d.input_reads[row.index()])
    }

    fn with<R>(&self, address: u8, f: impl FnOnce(&mut Device) -> R) -> R {
        let mut devices = self.devices.lock().unwrap();
        f(devices.entry(address).or_default())
    }
}

impl i2c::ErrorType for SimBus {
    type Error = Infallible;
}

impl I2c for SimBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.with(address, |device| {
            let mut pointer = 0usize;
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) => {
                        if let Some((&reg, data)) = bytes.split_first() {
                            pointer = reg as usize;
                            for &byte in data {
                                device.write(pointer, byte);
                                pointer += 1;
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        for byte in buf.iter_mut() {
                            *byte = device.read(pointer);
                            pointer += 1;
                        }
                    }
                }
            }
        });
        Ok(())
    }
}

/// Output that accepts every level.
#[derive(Debug, Default)]
pub struct NullCoil;

impl digital::ErrorType for NullCoil {
    type Error = Infallible;
}

impl OutputPin for NullCoil {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Input that reads high from its `pressed_from`-th read onward.
#[derive(Debug)]
pub struct ScriptedSwitch {
    pub pressed_from: u32,
    pub reads: u32,
}

impl ScriptedSwitch {
    pub fn new(pressed_from: u32) -> Self {
        Self {
            pressed_from,
            reads: 0,
        }
    }
}

impl digital::ErrorType for ScriptedSwitch {
    type Error = Infallible;
}

impl InputPin for ScriptedSwitch {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        let high = self.reads >= self.pressed_from;
        self.reads += 1;
        Ok(high)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|h| !h)
    }
}
