pub mod fake_bus;
pub mod i2c;

pub use self::fake_bus::FakeBus;
pub use self::i2c::I2cBus;

/// Failures a bus implementation can report.
#[derive(Debug, PartialEq)]
pub enum BusError<E> {
    /// Underlying transport error
    Comm(E),
    /// The device did not answer within the transport's deadline
    Timeout,
    /// The request exceeded what the implementation can stage
    Internal,
}

/// Byte-register access to one addressed device.
///
/// This is the seam between the sensor driver and whatever actually moves the
/// bytes: an I2C or SPI peripheral on a target, or [`FakeBus`] on a host.
/// Implementations own their transport state; the driver never sees it.
pub trait RegisterBus {
    /// Error type of the underlying transport
    type TransportError;

    /// Read `buf.len()` bytes starting at `reg`.
    ///
    /// The register pointer auto-increments and wraps modulo the 256-register
    /// address space, so a multi-byte read starting near the top is legal.
    fn reg_read(
        &mut self,
        device_addr: u8,
        reg: u8,
        buf: &mut [u8],
    ) -> Result<(), BusError<Self::TransportError>>;

    /// Write `data` to consecutive registers starting at `reg`, with the same
    /// wraparound rule as [`RegisterBus::reg_read`].
    fn reg_write(
        &mut self,
        device_addr: u8,
        reg: u8,
        data: &[u8],
    ) -> Result<(), BusError<Self::TransportError>>;
}
