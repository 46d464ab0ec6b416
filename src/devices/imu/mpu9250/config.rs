//! MPU-9250 configuration
//!
//! Full-scale range and magnetometer mode selection. Each range enum
//! carries its 2-bit register code, the pre-shifted register field
//! value, and the sensitivity constant used by the conversion helpers.

use super::registers;
use crate::devices::traits::ImuError;

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    /// ±2 g
    G2,
    /// ±4 g
    G4,
    /// ±8 g (default, good balance of range and resolution)
    #[default]
    G8,
    /// ±16 g
    G16,
}

impl AccelRange {
    /// The 2-bit range code
    pub fn code(self) -> u8 {
        match self {
            AccelRange::G2 => 0,
            AccelRange::G4 => 1,
            AccelRange::G8 => 2,
            AccelRange::G16 => 3,
        }
    }

    /// The register field value (code shifted into ACCEL_CONFIG[4:3])
    pub fn register_value(self) -> u8 {
        match self {
            AccelRange::G2 => registers::ACCEL_FS_SEL_2G,
            AccelRange::G4 => registers::ACCEL_FS_SEL_4G,
            AccelRange::G8 => registers::ACCEL_FS_SEL_8G,
            AccelRange::G16 => registers::ACCEL_FS_SEL_16G,
        }
    }

    /// Sensitivity (LSB per g) for this range
    pub fn sensitivity(self) -> f32 {
        match self {
            AccelRange::G2 => registers::ACCEL_SENSITIVITY_2G,
            AccelRange::G4 => registers::ACCEL_SENSITIVITY_4G,
            AccelRange::G8 => registers::ACCEL_SENSITIVITY_8G,
            AccelRange::G16 => registers::ACCEL_SENSITIVITY_16G,
        }
    }

    /// Scale factor converting raw counts to m/s²
    pub fn scale_to_m_s2(self) -> f32 {
        registers::GRAVITY / self.sensitivity()
    }
}

impl TryFrom<u8> for AccelRange {
    type Error = ImuError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(AccelRange::G2),
            1 => Ok(AccelRange::G4),
            2 => Ok(AccelRange::G8),
            3 => Ok(AccelRange::G16),
            other => Err(ImuError::InvalidRange(other)),
        }
    }
}

/// Gyroscope full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    /// ±250 °/s
    Dps250,
    /// ±500 °/s
    Dps500,
    /// ±1000 °/s
    Dps1000,
    /// ±2000 °/s (default for high dynamics)
    #[default]
    Dps2000,
}

impl GyroRange {
    /// The 2-bit range code
    pub fn code(self) -> u8 {
        match self {
            GyroRange::Dps250 => 0,
            GyroRange::Dps500 => 1,
            GyroRange::Dps1000 => 2,
            GyroRange::Dps2000 => 3,
        }
    }

    /// The register field value (code shifted into GYRO_CONFIG[4:3])
    pub fn register_value(self) -> u8 {
        match self {
            GyroRange::Dps250 => registers::GYRO_FS_SEL_250DPS,
            GyroRange::Dps500 => registers::GYRO_FS_SEL_500DPS,
            GyroRange::Dps1000 => registers::GYRO_FS_SEL_1000DPS,
            GyroRange::Dps2000 => registers::GYRO_FS_SEL_2000DPS,
        }
    }

    /// Sensitivity (LSB per °/s) for this range
    pub fn sensitivity(self) -> f32 {
        match self {
            GyroRange::Dps250 => registers::GYRO_SENSITIVITY_250DPS,
            GyroRange::Dps500 => registers::GYRO_SENSITIVITY_500DPS,
            GyroRange::Dps1000 => registers::GYRO_SENSITIVITY_1000DPS,
            GyroRange::Dps2000 => registers::GYRO_SENSITIVITY_2000DPS,
        }
    }

    /// Scale factor converting raw counts to rad/s
    pub fn scale_to_rad_s(self) -> f32 {
        registers::DEG_TO_RAD / self.sensitivity()
    }
}

impl TryFrom<u8> for GyroRange {
    type Error = ImuError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(GyroRange::Dps250),
            1 => Ok(GyroRange::Dps500),
            2 => Ok(GyroRange::Dps1000),
            3 => Ok(GyroRange::Dps2000),
            other => Err(ImuError::InvalidRange(other)),
        }
    }
}

/// AK8963 measurement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagMode {
    /// Power-down
    PowerDown,
    /// Single measurement, returns to power-down afterwards
    Single,
    /// Continuous measurement at 8 Hz
    Continuous8Hz,
    /// Continuous measurement at 100 Hz (default)
    #[default]
    Continuous100Hz,
}

impl MagMode {
    /// The CNTL1 register value for this mode
    ///
    /// 16-bit output is always selected; the drivers only decode the
    /// 16-bit wire format.
    pub fn register_value(self) -> u8 {
        let mode = match self {
            MagMode::PowerDown => registers::AK8963_MODE_POWER_DOWN,
            MagMode::Single => registers::AK8963_MODE_SINGLE_MEASURE,
            MagMode::Continuous8Hz => registers::AK8963_MODE_CONT_MEASURE_1,
            MagMode::Continuous100Hz => registers::AK8963_MODE_CONT_MEASURE_2,
        };
        registers::AK8963_BIT_16BIT | mode
    }
}

/// MPU-9250 driver configuration
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mpu9250Config {
    /// Accelerometer full-scale range
    pub accel_range: AccelRange,
    /// Gyroscope full-scale range
    pub gyro_range: GyroRange,
    /// Magnetometer measurement mode
    pub mag_mode: MagMode,
}

impl Mpu9250Config {
    /// Configuration with explicit full-scale ranges and the default
    /// magnetometer mode
    pub fn with_ranges(accel_range: AccelRange, gyro_range: GyroRange) -> Self {
        Self {
            accel_range,
            gyro_range,
            mag_mode: MagMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accel_range_register_values() {
        assert_eq!(AccelRange::G2.register_value(), 0x00);
        assert_eq!(AccelRange::G4.register_value(), 0x08);
        assert_eq!(AccelRange::G8.register_value(), 0x10);
        assert_eq!(AccelRange::G16.register_value(), 0x18);
    }

    #[test]
    fn test_gyro_range_register_values() {
        assert_eq!(GyroRange::Dps250.register_value(), 0x00);
        assert_eq!(GyroRange::Dps500.register_value(), 0x08);
        assert_eq!(GyroRange::Dps1000.register_value(), 0x10);
        assert_eq!(GyroRange::Dps2000.register_value(), 0x18);
    }

    #[test]
    fn test_register_value_is_shifted_code() {
        for range in [
            AccelRange::G2,
            AccelRange::G4,
            AccelRange::G8,
            AccelRange::G16,
        ] {
            assert_eq!(
                range.register_value(),
                range.code() << registers::FS_SEL_SHIFT
            );
        }
    }

    #[test]
    fn test_range_code_round_trip() {
        for code in 0..=3u8 {
            assert_eq!(AccelRange::try_from(code).unwrap().code(), code);
            assert_eq!(GyroRange::try_from(code).unwrap().code(), code);
        }
    }

    #[test]
    fn test_out_of_range_code_rejected() {
        assert_eq!(AccelRange::try_from(4), Err(ImuError::InvalidRange(4)));
        assert_eq!(GyroRange::try_from(0xFF), Err(ImuError::InvalidRange(0xFF)));
    }

    #[test]
    fn test_mag_mode_register_values() {
        // 16-bit output flag is always present.
        assert_eq!(MagMode::PowerDown.register_value(), 0x10);
        assert_eq!(MagMode::Single.register_value(), 0x11);
        assert_eq!(MagMode::Continuous8Hz.register_value(), 0x12);
        assert_eq!(MagMode::Continuous100Hz.register_value(), 0x16);
    }

    #[test]
    fn test_accel_scale_g2() {
        let scale = AccelRange::G2.scale_to_m_s2();
        // ±2g at 16384 LSB/g: 9.80665 / 16384 ≈ 0.000598
        assert!(scale > 0.0005 && scale < 0.0007);
    }

    #[test]
    fn test_gyro_scale_dps250() {
        let scale = GyroRange::Dps250.scale_to_rad_s();
        // ±250°/s at 131 LSB/°/s: π/180 / 131 ≈ 0.000133
        assert!(scale > 0.0001 && scale < 0.0002);
    }

    #[test]
    fn test_default_config() {
        let config = Mpu9250Config::default();
        assert_eq!(config.accel_range, AccelRange::G8);
        assert_eq!(config.gyro_range, GyroRange::Dps2000);
        assert_eq!(config.mag_mode, MagMode::Continuous100Hz);
    }
}
