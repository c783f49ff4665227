use embedded_hal::blocking::i2c::{Write, WriteRead};

use super::{BusError, RegisterBus};

/// Largest write we can stage: one register byte plus the payload.
const WRITE_STAGE_BUF_LEN: usize = 16;

/// Adapts any `embedded-hal` blocking i2c peripheral to [`RegisterBus`].
///
/// Register reads follow the usual convention of writing the register pointer
/// and reading back in one combined transaction.
pub struct I2cBus<I2C> {
    /// i2c port
    i2c_port: I2C,
    /// buffer for staging register writes
    stage_buf: [u8; WRITE_STAGE_BUF_LEN],
}

impl<I2C, CommE> I2cBus<I2C>
where
    I2C: Write<Error = CommE> + WriteRead<Error = CommE>,
{
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c_port: i2c,
            stage_buf: [0; WRITE_STAGE_BUF_LEN],
        }
    }

    /// Give the i2c port back to the caller
    pub fn free(self) -> I2C {
        self.i2c_port
    }
}

impl<I2C, CommE> RegisterBus for I2cBus<I2C>
where
    I2C: Write<Error = CommE> + WriteRead<Error = CommE>,
{
    type TransportError = CommE;

    fn reg_read(
        &mut self,
        device_addr: u8,
        reg: u8,
        buf: &mut [u8],
    ) -> Result<(), BusError<CommE>> {
        self.i2c_port
            .write_read(device_addr, &[reg], buf)
            .map_err(BusError::Comm)
    }

    fn reg_write(
        &mut self,
        device_addr: u8,
        reg: u8,
        data: &[u8],
    ) -> Result<(), BusError<CommE>> {
        let total_len = data.len() + 1;
        if total_len > WRITE_STAGE_BUF_LEN {
            return Err(BusError::Internal);
        }
        self.stage_buf[0] = reg;
        self.stage_buf[1..total_len].copy_from_slice(data);
        self.i2c_port
            .write(device_addr, &self.stage_buf[..total_len])
            .map_err(BusError::Comm)
    }
}
