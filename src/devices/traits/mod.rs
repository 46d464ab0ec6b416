//! Device traits
//!
//! This module contains hardware-independent type and trait definitions
//! for device drivers. These enable:
//! - Unit testing with mock implementations
//! - Sensor independence for higher-level consumers
//! - Future hardware upgrades without consumer changes

pub mod imu;

pub use imu::{
    ImuError, ImuReading, ImuSample, ImuSensor, InitFault, InitReport, InitStage, Readiness,
};
