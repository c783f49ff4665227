use core::convert::Infallible;

use super::{BusError, RegisterBus};
use crate::{DEVICE_ID, REG_TEMP_LSB, REG_TEMP_MSB, REG_WHO_AM_I};

/// Size of the simulated register file
pub const REGISTER_COUNT: usize = 256;

/// Temperature the simulated part powers up at: 25.00 °C
const TEMP_SEED_CENTI: i16 = 2500;
/// How far the simulated temperature drifts per bus read: +0.05 °C
const TEMP_STEP_CENTI: i16 = 5;

/// A simulated TMP42 behind the [`RegisterBus`] trait.
///
/// Models one device as a flat 256-register byte file plus a hidden
/// temperature counter. Every read steps the counter and re-encodes it into
/// the MSB/LSB pair before serving data, so back-to-back samples drift the
/// way a live sensor's would. The device address is ignored; there is only
/// one simulated part on the bus.
pub struct FakeBus {
    regs: [u8; REGISTER_COUNT],
    temp_centi: i16,
}

impl FakeBus {
    pub fn new() -> Self {
        let mut bus = Self {
            regs: [0; REGISTER_COUNT],
            temp_centi: 0,
        };
        bus.reset();
        bus
    }

    /// Return the register file to its power-on state: all zero, identity
    /// register set, temperature seeded to 25.00 °C.
    pub fn reset(&mut self) {
        self.regs = [0; REGISTER_COUNT];
        self.regs[REG_WHO_AM_I as usize] = DEVICE_ID;
        self.seed_temperature(TEMP_SEED_CENTI);
    }

    /// Force the simulated temperature and mirror it into the register pair.
    pub fn seed_temperature(&mut self, centi: i16) {
        self.temp_centi = centi;
        self.encode_temperature();
    }

    /// Peek one register without triggering the temperature walk.
    pub fn register(&self, reg: u8) -> u8 {
        self.regs[reg as usize]
    }

    /// Poke one register directly, e.g. to corrupt the identity byte in tests.
    pub fn set_register(&mut self, reg: u8, value: u8) {
        self.regs[reg as usize] = value;
    }

    fn step_temperature(&mut self) {
        self.temp_centi = self.temp_centi.wrapping_add(TEMP_STEP_CENTI);
        self.encode_temperature();
    }

    /// big-endian two's-complement, MSB first
    fn encode_temperature(&mut self) {
        let raw = self.temp_centi.to_be_bytes();
        self.regs[REG_TEMP_MSB as usize] = raw[0];
        self.regs[REG_TEMP_LSB as usize] = raw[1];
    }
}

impl Default for FakeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterBus for FakeBus {
    type TransportError = Infallible;

    fn reg_read(
        &mut self,
        _device_addr: u8,
        reg: u8,
        buf: &mut [u8],
    ) -> Result<(), BusError<Infallible>> {
        // step before serving, so every sample observes fresh drift
        self.step_temperature();
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = self.regs[reg.wrapping_add(i as u8) as usize];
        }
        Ok(())
    }

    fn reg_write(
        &mut self,
        _device_addr: u8,
        reg: u8,
        data: &[u8],
    ) -> Result<(), BusError<Infallible>> {
        for (i, byte) in data.iter().enumerate() {
            self.regs[reg.wrapping_add(i as u8) as usize] = *byte;
        }
        Ok(())
    }
}
