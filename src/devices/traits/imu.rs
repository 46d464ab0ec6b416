//! IMU data types and sensor interface
//!
//! Device-independent types shared by IMU drivers and their consumers:
//! the raw sample record, the converted reading, the driver error
//! taxonomy, and the aggregated initialization outcome.

use crate::platform::PlatformError;
use heapless::Vec;
use nalgebra::Vector3;

/// One possible fault per initialization stage.
const MAX_INIT_FAULTS: usize = 8;

/// IMU driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImuError {
    /// Bus transport failure (NACK, bus fault, timeout)
    Bus(PlatformError),
    /// Device responded with an unexpected identity byte
    IdentityMismatch { expected: u8, found: u8 },
    /// Raw full-scale range code outside the 2-bit field
    InvalidRange(u8),
    /// Read issued before `init`
    NotInitialized,
}

/// Raw sensor sample, one record per read cycle
///
/// All fields are raw integer counts, exactly as decoded from the wire,
/// in fixed X, Y, Z axis order. No timestamp is attached; that is the
/// caller's responsibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuSample {
    /// Accelerometer counts
    pub accel: [i16; 3],
    /// Gyroscope counts
    pub gyro: [i16; 3],
    /// Temperature counts
    pub temp: i16,
    /// Magnetometer counts
    pub mag: [i16; 3],
}

/// Sample converted to engineering units
///
/// Produced only by the pure conversion functions; the read path never
/// touches floating point.
#[derive(Debug, Clone, Copy)]
pub struct ImuReading {
    /// Accelerometer: m/s² (includes gravity)
    pub accel: Vector3<f32>,
    /// Gyroscope: rad/s
    pub gyro: Vector3<f32>,
    /// Magnetometer: µT
    pub mag: Vector3<f32>,
    /// Temperature: °C
    pub temperature: f32,
}

/// Outcome of an initialization pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Readiness {
    /// Every initialization stage completed
    Ready,
    /// One or more stages failed; device state is indeterminate
    Degraded,
}

/// Initialization stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStage {
    /// Clear the power-management sleep bit
    Wake,
    /// Route the auxiliary chip through the pass-through window
    BusMode,
    /// Accelerometer full-scale range read-modify-write
    AccelRange,
    /// Gyroscope full-scale range read-modify-write
    GyroRange,
    /// Primary identity register check
    Identity,
    /// Auxiliary identity register read
    MagIdentity,
    /// Auxiliary measurement mode write
    MagMode,
    /// Auxiliary mode readback
    MagVerify,
}

/// A failed initialization stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitFault {
    pub stage: InitStage,
    pub error: ImuError,
}

/// Aggregated initialization outcome
///
/// Initialization never aborts: each failed register operation is
/// logged and recorded here, and the device still lands in the ready
/// state. `readiness` distinguishes a clean bring-up from a degraded
/// one, and the fault list tells the caller which stages failed and
/// whether the cause was the transport or a mismatched identity byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    faults: Vec<InitFault, MAX_INIT_FAULTS>,
}

impl InitReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self { faults: Vec::new() }
    }

    /// Record a failed stage
    pub fn record(&mut self, stage: InitStage, error: ImuError) {
        let _ = self.faults.push(InitFault { stage, error });
    }

    /// Overall readiness outcome
    pub fn readiness(&self) -> Readiness {
        if self.faults.is_empty() {
            Readiness::Ready
        } else {
            Readiness::Degraded
        }
    }

    /// True if no stage failed
    pub fn is_ready(&self) -> bool {
        self.faults.is_empty()
    }

    /// Recorded faults, in stage execution order
    pub fn faults(&self) -> &[InitFault] {
        &self.faults
    }

    /// The error recorded for `stage`, if that stage failed
    pub fn fault_at(&self, stage: InitStage) -> Option<ImuError> {
        self.faults
            .iter()
            .find(|fault| fault.stage == stage)
            .map(|fault| fault.error)
    }
}

/// Synchronous 9-axis sensor interface
///
/// This trait abstracts IMU hardware specifics, enabling testability
/// with mock implementations and sensor independence for consumers.
/// Primary (accel/gyro/temp) and auxiliary (mag) reads are independent
/// operations; both fill the caller's sample in place and leave it
/// untouched on transport failure.
pub trait ImuSensor {
    /// Read accelerometer, temperature and gyroscope counts
    fn read_accel_gyro(&mut self, sample: &mut ImuSample) -> Result<(), ImuError>;

    /// Read magnetometer counts
    fn read_mag(&mut self, sample: &mut ImuSample) -> Result<(), ImuError>;

    /// Get sensor health status
    ///
    /// Returns false if the sensor failed to initialize cleanly or has
    /// accumulated consecutive read errors.
    fn is_healthy(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::error::SpiError;

    #[test]
    fn test_imu_sample_default_is_zeroed() {
        let sample = ImuSample::default();
        assert_eq!(sample.accel, [0, 0, 0]);
        assert_eq!(sample.gyro, [0, 0, 0]);
        assert_eq!(sample.temp, 0);
        assert_eq!(sample.mag, [0, 0, 0]);
    }

    #[test]
    fn test_empty_report_is_ready() {
        let report = InitReport::new();
        assert!(report.is_ready());
        assert_eq!(report.readiness(), Readiness::Ready);
        assert!(report.faults().is_empty());
    }

    #[test]
    fn test_recorded_fault_degrades_report() {
        let mut report = InitReport::new();
        report.record(
            InitStage::Wake,
            ImuError::Bus(PlatformError::Spi(SpiError::TransferFailed)),
        );

        assert!(!report.is_ready());
        assert_eq!(report.readiness(), Readiness::Degraded);
        assert_eq!(report.faults().len(), 1);
    }

    #[test]
    fn test_fault_at_finds_stage() {
        let mut report = InitReport::new();
        report.record(
            InitStage::Identity,
            ImuError::IdentityMismatch {
                expected: 0x71,
                found: 0x70,
            },
        );

        assert_eq!(
            report.fault_at(InitStage::Identity),
            Some(ImuError::IdentityMismatch {
                expected: 0x71,
                found: 0x70,
            })
        );
        assert_eq!(report.fault_at(InitStage::Wake), None);
    }

    /// Mock ImuSensor implementation for testing consumers
    struct MockImuSensor {
        sample: ImuSample,
        healthy: bool,
    }

    impl ImuSensor for MockImuSensor {
        fn read_accel_gyro(&mut self, sample: &mut ImuSample) -> Result<(), ImuError> {
            if !self.healthy {
                return Err(ImuError::Bus(PlatformError::Spi(SpiError::Timeout)));
            }
            sample.accel = self.sample.accel;
            sample.gyro = self.sample.gyro;
            sample.temp = self.sample.temp;
            Ok(())
        }

        fn read_mag(&mut self, sample: &mut ImuSample) -> Result<(), ImuError> {
            if !self.healthy {
                return Err(ImuError::Bus(PlatformError::Spi(SpiError::Timeout)));
            }
            sample.mag = self.sample.mag;
            Ok(())
        }

        fn is_healthy(&self) -> bool {
            self.healthy
        }
    }

    #[test]
    fn test_mock_sensor_fills_sample_in_place() {
        let mut sensor = MockImuSensor {
            sample: ImuSample {
                accel: [1, 2, 3],
                gyro: [4, 5, 6],
                temp: 7,
                mag: [8, 9, 10],
            },
            healthy: true,
        };

        let mut sample = ImuSample::default();
        sensor.read_accel_gyro(&mut sample).unwrap();
        assert_eq!(sample.accel, [1, 2, 3]);
        assert_eq!(sample.mag, [0, 0, 0]);

        sensor.read_mag(&mut sample).unwrap();
        assert_eq!(sample.mag, [8, 9, 10]);
    }

    #[test]
    fn test_mock_sensor_unhealthy_leaves_sample() {
        let mut sensor = MockImuSensor {
            sample: ImuSample::default(),
            healthy: false,
        };

        let mut sample = ImuSample {
            accel: [1, 1, 1],
            ..Default::default()
        };
        assert!(sensor.read_accel_gyro(&mut sample).is_err());
        assert_eq!(sample.accel, [1, 1, 1]);
        assert!(!sensor.is_healthy());
    }
}
