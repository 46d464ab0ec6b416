//! AK8963 auxiliary magnetometer driver
//!
//! The AK8963 die has no bus pins of its own; its registers are exposed
//! through the MPU-9250's pass-through window, in the same register
//! space the primary driver uses. The driver therefore borrows the
//! primary driver's device handle instead of binding a second bus,
//! which also serializes primary and auxiliary transactions.

use super::config::MagMode;
use super::registers;
use crate::devices::traits::{ImuError, ImuSample, InitReport, InitStage};
use crate::platform::RegisterInterface;

/// AK8963 driver, a borrow view over the shared device handle
pub struct Ak8963<'a, B: RegisterInterface> {
    bus: &'a mut B,
}

impl<'a, B: RegisterInterface> Ak8963<'a, B> {
    /// Borrow the shared device handle
    pub fn new(bus: &'a mut B) -> Self {
        Self { bus }
    }

    /// Read the raw WIA identity byte (nominally 0x48)
    pub fn identity(&mut self) -> Result<u8, ImuError> {
        self.read_register(registers::AK8963_WIA)
    }

    /// Initialize the magnetometer
    ///
    /// Reads WIA for diagnostics, writes the measurement mode (a pure
    /// write, never read-modify-write) and reads the mode back for
    /// confirmation. Failures are logged and recorded in `report`;
    /// initialization continues regardless.
    pub fn init(&mut self, mode: MagMode, report: &mut InitReport) {
        match self.identity() {
            Ok(id) => {
                crate::log_info!("AK8963 chip id: {:#x}", id);
                if id != registers::AK8963_WIA_VALUE {
                    crate::log_warn!("unexpected AK8963 chip id: {:#x}", id);
                }
            }
            Err(e) => {
                crate::log_error!("AK8963 WIA read failed: {:?}", e);
                report.record(InitStage::MagIdentity, e);
            }
        }

        let value = mode.register_value();
        if let Err(e) = self.write_register(registers::AK8963_CNTL1, value) {
            crate::log_error!("AK8963 CNTL1 write failed: {:?}", e);
            report.record(InitStage::MagMode, e);
        }

        match self.read_register(registers::AK8963_CNTL1) {
            Ok(readback) => {
                crate::log_debug!("AK8963 control reg: {:#x}", readback);
                if readback != value {
                    crate::log_warn!(
                        "AK8963 CNTL1 readback {:#x}, wrote {:#x}",
                        readback,
                        value
                    );
                }
            }
            Err(e) => {
                crate::log_error!("AK8963 CNTL1 readback failed: {:?}", e);
                report.record(InitStage::MagVerify, e);
            }
        }
    }

    /// Check the ST1 data-ready bit
    pub fn data_ready(&mut self) -> Result<bool, ImuError> {
        let st1 = self.read_register(registers::AK8963_ST1)?;
        Ok(st1 & registers::AK8963_ST1_DRDY != 0)
    }

    /// Read the three magnetometer axes into `sample`
    ///
    /// Issues one 7-byte burst from HXL: six data bytes plus the status
    /// byte that ends the measurement cycle. The status byte is read
    /// but not interpreted. Values decode little-endian, opposite byte
    /// order from the primary sensor. On transport failure the sample
    /// is left untouched.
    pub fn read_all(&mut self, sample: &mut ImuSample) -> Result<(), ImuError> {
        let mut buf = [0u8; 7];
        self.read_registers(registers::AK8963_HXL, &mut buf)?;

        sample.mag = [
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ];

        Ok(())
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, ImuError> {
        let mut buf = [0u8; 1];
        self.bus.read_registers(reg, &mut buf).map_err(ImuError::Bus)?;
        Ok(buf[0])
    }

    fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), ImuError> {
        self.bus.read_registers(reg, buf).map_err(ImuError::Bus)
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), ImuError> {
        self.bus.write_register(reg, value).map_err(ImuError::Bus)
    }
}
