//! Raw-to-engineering-unit conversion
//!
//! Pure functions mapping raw counts to SI units using the range
//! sensitivity tables. Kept outside the read path: the drivers hand out
//! raw counts, and the caller decides if and when to convert.

use super::config::{AccelRange, GyroRange, Mpu9250Config};
use super::registers::{MAG_SENSITIVITY, TEMP_OFFSET, TEMP_SENSITIVITY};
use crate::devices::traits::{ImuReading, ImuSample};
use nalgebra::Vector3;

/// Convert raw accelerometer counts to m/s²
pub fn accel_to_m_s2(raw: [i16; 3], range: AccelRange) -> Vector3<f32> {
    let scale = range.scale_to_m_s2();
    Vector3::new(raw[0] as f32, raw[1] as f32, raw[2] as f32) * scale
}

/// Convert raw gyroscope counts to rad/s
pub fn gyro_to_rad_s(raw: [i16; 3], range: GyroRange) -> Vector3<f32> {
    let scale = range.scale_to_rad_s();
    Vector3::new(raw[0] as f32, raw[1] as f32, raw[2] as f32) * scale
}

/// Convert raw magnetometer counts (16-bit output) to µT
pub fn mag_to_microtesla(raw: [i16; 3]) -> Vector3<f32> {
    Vector3::new(raw[0] as f32, raw[1] as f32, raw[2] as f32) * MAG_SENSITIVITY
}

/// Convert raw temperature counts to °C
pub fn temp_to_celsius(raw: i16) -> f32 {
    (raw as f32 / TEMP_SENSITIVITY) + TEMP_OFFSET
}

/// Convert a whole raw sample using the ranges it was captured with
pub fn sample_to_reading(sample: &ImuSample, config: &Mpu9250Config) -> ImuReading {
    ImuReading {
        accel: accel_to_m_s2(sample.accel, config.accel_range),
        gyro: gyro_to_rad_s(sample.gyro, config.gyro_range),
        mag: mag_to_microtesla(sample.mag),
        temperature: temp_to_celsius(sample.temp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_room_temperature() {
        // At the datasheet offset (raw = 0), should return 21°C
        assert!((temp_to_celsius(0) - 21.0).abs() < 0.01);
    }

    #[test]
    fn test_temp_above_room() {
        // raw = 333.87 should give 22°C
        assert!((temp_to_celsius(334) - 22.0).abs() < 0.1);
    }

    #[test]
    fn test_accel_one_g() {
        // 16384 LSB at ±2g is exactly 1 g
        let accel = accel_to_m_s2([16384, 0, -16384], AccelRange::G2);
        assert!((accel.x - 9.80665).abs() < 0.001);
        assert_eq!(accel.y, 0.0);
        assert!((accel.z + 9.80665).abs() < 0.001);
    }

    #[test]
    fn test_gyro_one_degree_per_second() {
        // 131 LSB at ±250°/s is 1°/s ≈ 0.01745 rad/s
        let gyro = gyro_to_rad_s([131, 0, 0], GyroRange::Dps250);
        assert!((gyro.x - 0.017453).abs() < 1e-4);
    }

    #[test]
    fn test_mag_full_scale() {
        // 32760 LSB is 4912 µT in 16-bit output mode
        let mag = mag_to_microtesla([32760, 0, 0]);
        assert!((mag.x - 4912.0).abs() < 0.5);
    }

    #[test]
    fn test_sample_to_reading_uses_configured_ranges() {
        let sample = ImuSample {
            accel: [4096, 0, 0],
            gyro: [164, 0, 0],
            temp: 0,
            mag: [100, 0, 0],
        };
        let config = Mpu9250Config::default(); // ±8g, ±2000°/s

        let reading = sample_to_reading(&sample, &config);
        // 4096 LSB at ±8g (4096 LSB/g) is 1 g
        assert!((reading.accel.x - 9.80665).abs() < 0.001);
        // 164 LSB at ±2000°/s (16.4 LSB/°/s) is 10°/s
        assert!((reading.gyro.x - 10.0 * core::f32::consts::PI / 180.0).abs() < 1e-3);
        assert!((reading.temperature - 21.0).abs() < 0.01);
    }
}
