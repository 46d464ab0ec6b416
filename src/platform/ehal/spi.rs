//! SPI register bus over `embedded-hal`
//!
//! Implements the register-addressed protocol used by the MPU-9250
//! family on top of any `embedded_hal::spi::SpiDevice`. The `SpiDevice`
//! carries the bus binding and chip-select identity, so constructing
//! this adapter is the "bind bus, select chip" step.

use crate::platform::{error::SpiError, traits::RegisterInterface, PlatformError, Result};
use embedded_hal::spi::{Error as EhalSpiError, ErrorKind, Operation, SpiDevice};

/// Read transactions set bit 7 of the register address on the wire.
const READ_FLAG: u8 = 0x80;

/// Register bus adapter over an `embedded-hal` SPI device
pub struct SpiRegisterBus<SPI> {
    spi: SPI,
}

impl<SPI> SpiRegisterBus<SPI>
where
    SPI: SpiDevice,
{
    /// Wrap a bound and selected SPI device
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Release the underlying SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

fn map_spi_error<E: EhalSpiError>(err: E) -> PlatformError {
    let kind = match err.kind() {
        ErrorKind::Overrun => SpiError::Overrun,
        ErrorKind::ModeFault => SpiError::ModeFault,
        ErrorKind::FrameFormat => SpiError::FrameFormat,
        ErrorKind::ChipSelectFault => SpiError::ChipSelectFault,
        _ => SpiError::TransferFailed,
    };
    PlatformError::Spi(kind)
}

impl<SPI> RegisterInterface for SpiRegisterBus<SPI>
where
    SPI: SpiDevice,
{
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        self.spi
            .write(&[reg & !READ_FLAG, value])
            .map_err(map_spi_error)
    }

    fn read_registers(&mut self, reg: u8, buffer: &mut [u8]) -> Result<()> {
        self.spi
            .transaction(&mut [Operation::Write(&[reg | READ_FLAG]), Operation::Read(buffer)])
            .map_err(map_spi_error)
    }
}
