//! IMU drivers
//!
//! This module contains IMU sensor drivers built on the platform
//! abstraction.
//!
//! ## Available Drivers
//!
//! - `mpu9250`: MPU-9250 primary inertial sensor plus the AK8963
//!   magnetometer behind its pass-through window

pub mod mpu9250;

pub use mpu9250::Mpu9250Driver;
