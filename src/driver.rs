use core::fmt;

use embedded_hal::blocking::delay::DelayMs;

use crate::interface::{BusError, RegisterBus};
use crate::logging::{EventLog, NullLog, Severity};
use crate::{DEVICE_ID, REG_TEMP_MSB, REG_WHO_AM_I};

/// How long the part needs to settle after a successful identity check,
/// per the datasheet's power-up sequence.
pub const SETTLE_DELAY_MS: u8 = 10;

/// All possible errors in this crate
#[derive(Debug, PartialEq)]
pub enum Error<E> {
    /// Bus communication error
    Comm(BusError<E>),

    /// The device answered the identity read with an unexpected byte.
    /// Communication works, but this is not a TMP42.
    BadId(u8),
}

/// TMP42 driver, generic over the bus it talks through and the log sink it
/// reports to.
///
/// A driver is usable only after [`Tmp42::init`] has returned `Ok`; the
/// driver keeps no ready flag, so calling the read operations on a never- or
/// unsuccessfully-initialized instance reads whatever the device serves.
pub struct Tmp42<B, L = NullLog> {
    /// register bus the sensor is attached to
    bus: B,
    /// device address on that bus
    address: u8,
    /// optional diagnostics sink
    log: Option<L>,
}

impl<B> Tmp42<B> {
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            log: None,
        }
    }
}

impl<B, L> Tmp42<B, L> {
    pub fn with_log(bus: B, address: u8, log: L) -> Self {
        Self {
            bus,
            address,
            log: Some(log),
        }
    }

    /// Give the bus back to the caller
    pub fn free(self) -> B {
        self.bus
    }
}

impl<B, E, L> Tmp42<B, L>
where
    B: RegisterBus<TransportError = E>,
    L: EventLog,
{
    /// Verify the device identity and run the post-power-up settle delay.
    ///
    /// Returns [`Error::BadId`] when something answered but it is not a
    /// TMP42, and [`Error::Comm`] when nothing (or a broken bus) answered —
    /// materially different outcomes for a caller deciding between retry
    /// and abort. Retry policy belongs to the caller; this never retries.
    pub fn init(&mut self, delay: Option<&mut dyn DelayMs<u8>>) -> Result<(), Error<E>> {
        let id = self.device_id()?;
        if id != DEVICE_ID {
            self.note(
                Severity::Warn,
                format_args!("unexpected device id {:#04x}", id),
            );
            return Err(Error::BadId(id));
        }

        if let Some(delay) = delay {
            delay.delay_ms(SETTLE_DELAY_MS);
        }
        let address = self.address;
        self.note(Severity::Info, format_args!("sensor at {:#04x} ready", address));
        Ok(())
    }

    /// Read the raw identity byte from `WHO_AM_I`.
    ///
    /// No interpretation happens here; [`Tmp42::init`] owns the comparison
    /// against [`DEVICE_ID`].
    pub fn device_id(&mut self) -> Result<u8, Error<E>> {
        let mut id = [0u8; 1];
        self.bus
            .reg_read(self.address, REG_WHO_AM_I, &mut id)
            .map_err(Error::Comm)?;
        Ok(id[0])
    }

    /// Read the current temperature in centi-degrees Celsius (2534 = 25.34 °C).
    ///
    /// One two-byte read starting at the MSB register, decoded as big-endian
    /// two's complement. The value is returned as-is; plausibility filtering
    /// is up to the caller.
    pub fn read_temperature_centi(&mut self) -> Result<i16, Error<E>> {
        let mut raw = [0u8; 2];
        self.bus
            .reg_read(self.address, REG_TEMP_MSB, &mut raw)
            .map_err(Error::Comm)?;
        Ok(i16::from_be_bytes(raw))
    }

    fn note(&mut self, severity: Severity, message: fmt::Arguments) {
        if let Some(log) = self.log.as_mut() {
            log.log(severity, message);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;
    use std::string::String;
    use std::vec::Vec;

    use embedded_hal_mock::delay::MockNoop;

    use crate::interface::{BusError, FakeBus, RegisterBus};
    use crate::logging::{EventLog, Severity};
    use crate::{DEFAULT_ADDRESS, DEVICE_ID, REG_WHO_AM_I};

    use super::{Error, Tmp42, SETTLE_DELAY_MS};

    /// A bus with nobody on it: every transfer times out.
    struct DeadBus;

    impl RegisterBus for DeadBus {
        type TransportError = ();

        fn reg_read(&mut self, _a: u8, _r: u8, _buf: &mut [u8]) -> Result<(), BusError<()>> {
            Err(BusError::Timeout)
        }

        fn reg_write(&mut self, _a: u8, _r: u8, _data: &[u8]) -> Result<(), BusError<()>> {
            Err(BusError::Timeout)
        }
    }

    #[derive(Default)]
    struct RecordingDelay {
        requests_ms: Vec<u8>,
    }

    impl embedded_hal::blocking::delay::DelayMs<u8> for RecordingDelay {
        fn delay_ms(&mut self, ms: u8) {
            self.requests_ms.push(ms);
        }
    }

    #[derive(Default)]
    struct RecordingLog {
        entries: Vec<(Severity, String)>,
    }

    impl EventLog for RecordingLog {
        fn log(&mut self, severity: Severity, message: core::fmt::Arguments) {
            self.entries.push((severity, format!("{}", message)));
        }
    }

    #[test]
    fn init_succeeds_against_the_fake_part() {
        let mut sensor = Tmp42::new(FakeBus::new(), DEFAULT_ADDRESS);
        assert_eq!(sensor.init(None), Ok(()));
    }

    #[test]
    fn init_rejects_a_wrong_identity_byte() {
        for &wrong_id in &[0x00u8, 0x41, 0xFF] {
            let mut bus = FakeBus::new();
            bus.set_register(REG_WHO_AM_I, wrong_id);

            let mut sensor = Tmp42::new(bus, DEFAULT_ADDRESS);
            assert_eq!(sensor.init(None), Err(Error::BadId(wrong_id)));
        }
    }

    #[test]
    fn identity_gate_ignores_the_device_address() {
        for &addr in &[0x00u8, 0x50, 0x7F] {
            let mut sensor = Tmp42::new(FakeBus::new(), addr);
            assert_eq!(sensor.init(None), Ok(()));
        }
    }

    #[test]
    fn dead_bus_yields_comm_errors_everywhere() {
        let mut sensor = Tmp42::new(DeadBus, DEFAULT_ADDRESS);
        assert_eq!(sensor.device_id(), Err(Error::Comm(BusError::Timeout)));
        assert_eq!(sensor.init(None), Err(Error::Comm(BusError::Timeout)));
        assert_eq!(
            sensor.read_temperature_centi(),
            Err(Error::Comm(BusError::Timeout))
        );
    }

    #[test]
    fn device_id_reports_the_raw_identity_byte() {
        let mut sensor = Tmp42::new(FakeBus::new(), DEFAULT_ADDRESS);
        assert_eq!(sensor.device_id(), Ok(DEVICE_ID));
    }

    #[test]
    fn init_runs_the_settle_delay_when_a_delay_source_is_present() {
        let mut delay = RecordingDelay::default();
        let mut sensor = Tmp42::new(FakeBus::new(), DEFAULT_ADDRESS);
        assert_eq!(sensor.init(Some(&mut delay)), Ok(()));
        assert_eq!(delay.requests_ms, [SETTLE_DELAY_MS]);
    }

    #[test]
    fn init_skips_the_settle_delay_on_bad_id() {
        let mut bus = FakeBus::new();
        bus.set_register(REG_WHO_AM_I, 0x00);

        let mut delay = RecordingDelay::default();
        let mut sensor = Tmp42::new(bus, DEFAULT_ADDRESS);
        assert_eq!(sensor.init(Some(&mut delay)), Err(Error::BadId(0x00)));
        assert!(delay.requests_ms.is_empty());
    }

    #[test]
    fn init_status_is_the_same_with_and_without_optional_capabilities() {
        let mut bare = Tmp42::new(FakeBus::new(), DEFAULT_ADDRESS);

        let mut log = RecordingLog::default();
        let mut chatty = Tmp42::with_log(FakeBus::new(), DEFAULT_ADDRESS, &mut log);

        assert_eq!(bare.init(None), chatty.init(Some(&mut MockNoop::new())));
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.entries[0].0, Severity::Info);
        assert!(log.entries[0].1.contains("0x50"));
    }

    #[test]
    fn bad_id_is_reported_at_warn_severity() {
        let mut bus = FakeBus::new();
        bus.set_register(REG_WHO_AM_I, 0x13);

        let mut log = RecordingLog::default();
        let mut sensor = Tmp42::with_log(bus, DEFAULT_ADDRESS, &mut log);
        assert_eq!(sensor.init(None), Err(Error::BadId(0x13)));

        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.entries[0].0, Severity::Warn);
        assert!(log.entries[0].1.contains("0x13"));
    }

    #[test]
    fn consecutive_reads_walk_upward_in_fixed_steps() {
        let mut sensor = Tmp42::new(FakeBus::new(), DEFAULT_ADDRESS);
        sensor.init(None).unwrap();

        // the identity probe during init consumed one step from the 2500 seed
        assert_eq!(sensor.read_temperature_centi(), Ok(2510));
        assert_eq!(sensor.read_temperature_centi(), Ok(2515));
        assert_eq!(sensor.read_temperature_centi(), Ok(2520));
    }

    #[test]
    fn negative_temperatures_decode_via_twos_complement() {
        let mut bus = FakeBus::new();
        bus.seed_temperature(-1234);

        let mut sensor = Tmp42::new(bus, DEFAULT_ADDRESS);
        sensor.init(None).unwrap();

        // one step for the init probe, one for the read itself
        assert_eq!(sensor.read_temperature_centi(), Ok(-1224));
    }

    #[test]
    fn replacing_the_part_with_an_impostor_is_caught_on_reinit() {
        let mut sensor = Tmp42::new(FakeBus::new(), DEFAULT_ADDRESS);
        assert_eq!(sensor.init(None), Ok(()));

        let first = sensor.read_temperature_centi().unwrap();
        assert_eq!(first, 2510);

        // swap in a device that answers with the wrong identity
        let mut bus = sensor.free();
        bus.set_register(REG_WHO_AM_I, 0x00);

        let mut sensor = Tmp42::new(bus, DEFAULT_ADDRESS);
        assert_eq!(sensor.init(None), Err(Error::BadId(0x00)));
    }
}
