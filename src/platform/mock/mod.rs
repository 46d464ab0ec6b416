//! Mock platform implementation for testing
//!
//! This module provides a mock register bus that can be used for unit
//! testing drivers without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled

#![cfg(any(test, feature = "mock"))]

mod bus;

pub use bus::{BusTransaction, MockRegisterBus};
