//! embedded-hal backed platform implementation
//!
//! Adapters that expose any `embedded-hal` 1.x bus as a
//! `RegisterInterface`, for use on targets where a HAL crate already
//! provides the bus peripheral.

mod spi;

pub use spi::SpiRegisterBus;
