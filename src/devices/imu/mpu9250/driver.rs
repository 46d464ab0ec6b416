//! MPU-9250 driver implementation
//!
//! Owns the device handle and implements the two-chip initialization
//! sequence and the combined accel/gyro/temperature burst read.

use super::ak8963::Ak8963;
use super::config::{AccelRange, GyroRange, Mpu9250Config};
use super::registers;
use crate::devices::traits::{ImuError, ImuSample, ImuSensor, InitReport, InitStage, Readiness};
use crate::platform::RegisterInterface;

/// Maximum consecutive bus errors before marking the sensor unhealthy
const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// Driver lifecycle state
///
/// There is no transition back to `Uninitialized`: initialization
/// always lands in `Ready`, and a degraded bring-up is reported through
/// `Mpu9250Driver::readiness` rather than by refusing to come up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    Uninitialized,
    Initializing,
    Ready,
}

/// MPU-9250 driver
///
/// Generic over any register-addressed device handle. The handle is
/// moved in at construction and owned exclusively for the driver's
/// lifetime; the AK8963 driver borrows the same handle through the
/// pass-through window.
pub struct Mpu9250Driver<B: RegisterInterface> {
    /// Device handle
    bus: B,

    /// Driver configuration
    config: Mpu9250Config,

    /// Lifecycle state
    state: DriverState,

    /// Outcome of the last initialization pass
    readiness: Readiness,

    /// Health status
    healthy: bool,

    /// Consecutive bus error count
    error_count: u32,
}

impl<B: RegisterInterface> Mpu9250Driver<B> {
    /// Create a new driver (uninitialized)
    ///
    /// `bus` must already be bound to the chip; call `init()` before
    /// reading.
    pub fn new(bus: B, config: Mpu9250Config) -> Self {
        Self {
            bus,
            config,
            state: DriverState::Uninitialized,
            readiness: Readiness::Degraded,
            healthy: false,
            error_count: 0,
        }
    }

    /// Initialize the MPU-9250 and the AK8963 behind it
    ///
    /// Runs the full sequence: wake from sleep, route the pass-through
    /// window, write both full-scale ranges (read-modify-write,
    /// preserving the unrelated bits), verify identity, then initialize
    /// the magnetometer. A failed stage is logged and recorded but
    /// never aborts the sequence; the driver always ends up `Ready`,
    /// with the returned report stating whether that readiness is
    /// degraded.
    pub fn init(&mut self) -> InitReport {
        self.state = DriverState::Initializing;
        let mut report = InitReport::new();

        // Wake from sleep
        if let Err(e) = self.write_register(registers::PWR_MGMT_1, registers::PWR_MGMT_1_WAKE) {
            crate::log_error!("PWR_MGMT_1 wake failed: {:?}", e);
            report.record(InitStage::Wake, e);
        }

        // Disable the legacy secondary bus mode so the AK8963 registers
        // appear in the pass-through window
        if let Err(e) = self.write_register(registers::USER_CTRL, registers::USER_CTRL_I2C_DIS) {
            crate::log_error!("USER_CTRL write failed: {:?}", e);
            report.record(InitStage::BusMode, e);
        }

        // Full-scale ranges
        if let Err(e) = self.apply_accel_range(self.config.accel_range) {
            crate::log_error!("ACCEL_CONFIG update failed: {:?}", e);
            report.record(InitStage::AccelRange, e);
        }
        if let Err(e) = self.apply_gyro_range(self.config.gyro_range) {
            crate::log_error!("GYRO_CONFIG update failed: {:?}", e);
            report.record(InitStage::GyroRange, e);
        }

        // Identity check: a mismatch is recorded distinctly from a
        // transport failure
        match self.test_connection() {
            Ok(registers::MPU9250_WHO_AM_I_VALUE) => {
                crate::log_info!("MPU-9250 found");
            }
            Ok(found) => {
                crate::log_error!("MPU-9250 not found, WHO_AM_I: {:#x}", found);
                report.record(
                    InitStage::Identity,
                    ImuError::IdentityMismatch {
                        expected: registers::MPU9250_WHO_AM_I_VALUE,
                        found,
                    },
                );
            }
            Err(e) => {
                crate::log_error!("WHO_AM_I read failed: {:?}", e);
                report.record(InitStage::Identity, e);
            }
        }

        // Auxiliary magnetometer, through the same handle
        let mode = self.config.mag_mode;
        Ak8963::new(&mut self.bus).init(mode, &mut report);

        self.state = DriverState::Ready;
        self.readiness = report.readiness();
        self.healthy = report.is_ready();
        report
    }

    /// Read the raw identity byte
    ///
    /// The caller compares against 0x71 to decide "found" vs "not found".
    pub fn test_connection(&mut self) -> Result<u8, ImuError> {
        self.read_register(registers::WHO_AM_I)
    }

    /// Read accelerometer, temperature and gyroscope counts into `sample`
    ///
    /// Issues a single 14-byte burst from ACCEL_XOUT_H and decodes
    /// seven big-endian signed 16-bit values in fixed order: accel
    /// X/Y/Z, temperature, gyro X/Y/Z. On transport failure the sample
    /// is left untouched and the error is returned.
    pub fn read_accel_gyro(&mut self, sample: &mut ImuSample) -> Result<(), ImuError> {
        if self.state != DriverState::Ready {
            return Err(ImuError::NotInitialized);
        }

        let mut buf = [0u8; 14];
        self.read_registers(registers::ACCEL_XOUT_H, &mut buf)?;

        sample.accel = [
            i16::from_be_bytes([buf[0], buf[1]]),
            i16::from_be_bytes([buf[2], buf[3]]),
            i16::from_be_bytes([buf[4], buf[5]]),
        ];
        sample.temp = i16::from_be_bytes([buf[6], buf[7]]);
        sample.gyro = [
            i16::from_be_bytes([buf[8], buf[9]]),
            i16::from_be_bytes([buf[10], buf[11]]),
            i16::from_be_bytes([buf[12], buf[13]]),
        ];

        Ok(())
    }

    /// Read magnetometer counts into `sample`
    ///
    /// Delegates to the AK8963 driver over the shared handle.
    pub fn read_mag(&mut self, sample: &mut ImuSample) -> Result<(), ImuError> {
        if self.state != DriverState::Ready {
            return Err(ImuError::NotInitialized);
        }

        let result = Ak8963::new(&mut self.bus).read_all(sample);
        match &result {
            Ok(()) => self.error_count = 0,
            Err(ImuError::Bus(_)) => self.note_bus_error(),
            Err(_) => {}
        }
        result
    }

    /// Borrow the AK8963 behind the pass-through window
    pub fn mag(&mut self) -> Ak8963<'_, B> {
        Ak8963::new(&mut self.bus)
    }

    /// Reconfigure the accelerometer full-scale range
    pub fn set_accel_range(&mut self, range: AccelRange) -> Result<(), ImuError> {
        self.apply_accel_range(range)?;
        self.config.accel_range = range;
        Ok(())
    }

    /// Reconfigure the gyroscope full-scale range
    pub fn set_gyro_range(&mut self, range: GyroRange) -> Result<(), ImuError> {
        self.apply_gyro_range(range)?;
        self.config.gyro_range = range;
        Ok(())
    }

    /// Current driver configuration
    pub fn config(&self) -> &Mpu9250Config {
        &self.config
    }

    /// Lifecycle state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Outcome of the last initialization pass
    ///
    /// `Degraded` until `init` has completed cleanly.
    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    /// Release the device handle
    pub fn release(self) -> B {
        self.bus
    }

    /// Write a full-scale range field, preserving the other bits of the
    /// configuration register
    fn apply_accel_range(&mut self, range: AccelRange) -> Result<(), ImuError> {
        let current = self.read_register(registers::ACCEL_CONFIG)?;
        let value = (current & registers::FS_SEL_KEEP_MASK) | range.register_value();
        self.write_register(registers::ACCEL_CONFIG, value)
    }

    fn apply_gyro_range(&mut self, range: GyroRange) -> Result<(), ImuError> {
        let current = self.read_register(registers::GYRO_CONFIG)?;
        let value = (current & registers::FS_SEL_KEEP_MASK) | range.register_value();
        self.write_register(registers::GYRO_CONFIG, value)
    }

    fn note_bus_error(&mut self) {
        self.error_count += 1;
        if self.error_count >= MAX_CONSECUTIVE_ERRORS {
            self.healthy = false;
        }
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, ImuError> {
        let mut buf = [0u8; 1];
        match self.bus.read_registers(reg, &mut buf) {
            Ok(()) => {
                self.error_count = 0;
                Ok(buf[0])
            }
            Err(e) => {
                self.note_bus_error();
                Err(ImuError::Bus(e))
            }
        }
    }

    fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), ImuError> {
        match self.bus.read_registers(reg, buf) {
            Ok(()) => {
                self.error_count = 0;
                Ok(())
            }
            Err(e) => {
                self.note_bus_error();
                Err(ImuError::Bus(e))
            }
        }
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), ImuError> {
        match self.bus.write_register(reg, value) {
            Ok(()) => {
                self.error_count = 0;
                Ok(())
            }
            Err(e) => {
                self.note_bus_error();
                Err(ImuError::Bus(e))
            }
        }
    }
}

impl<B: RegisterInterface> ImuSensor for Mpu9250Driver<B> {
    fn read_accel_gyro(&mut self, sample: &mut ImuSample) -> Result<(), ImuError> {
        Mpu9250Driver::read_accel_gyro(self, sample)
    }

    fn read_mag(&mut self, sample: &mut ImuSample) -> Result<(), ImuError> {
        Mpu9250Driver::read_mag(self, sample)
    }

    fn is_healthy(&self) -> bool {
        self.state == DriverState::Ready && self.healthy
    }
}
