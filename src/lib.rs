//! Driver for the TMP42, a register-based temperature sensor, usable on any
//! platform that provides the `embedded-hal` blocking traits.
//!
//! The sensor exposes a flat 256-register byte space: a `WHO_AM_I` identity
//! register and a big-endian register pair holding the current temperature in
//! centi-degrees Celsius (2534 = 25.34 °C). The driver talks to the device
//! through the [`RegisterBus`] trait, so the same logic runs against a real
//! I2C peripheral ([`interface::I2cBus`]) or the bundled simulated device
//! ([`interface::FakeBus`]) with no hardware attached.
//!
//! ```
//! use tmp42::{Tmp42, DEFAULT_ADDRESS};
//! use tmp42::interface::FakeBus;
//!
//! let mut sensor = Tmp42::new(FakeBus::new(), DEFAULT_ADDRESS);
//! sensor.init(None).unwrap();
//!
//! let centi = sensor.read_temperature_centi().unwrap();
//! assert!(centi >= 2500);
//! ```

#![no_std]

pub mod driver;
pub mod interface;
pub mod logging;

pub use crate::driver::{Error, Tmp42};
pub use crate::interface::{BusError, RegisterBus};
pub use crate::logging::{EventLog, NullLog, Severity};

/// the i2c address the TMP42 answers on when its address pin is grounded
pub const DEFAULT_ADDRESS: u8 = 0x50;

/// identity register; reads back [`DEVICE_ID`] on a genuine part
pub const REG_WHO_AM_I: u8 = 0x00;
/// high byte of the centi-degree temperature value
pub const REG_TEMP_MSB: u8 = 0x10;
/// low byte of the centi-degree temperature value
pub const REG_TEMP_LSB: u8 = 0x11;

/// the identity byte every TMP42 reports from `WHO_AM_I`
pub const DEVICE_ID: u8 = 0x42;
