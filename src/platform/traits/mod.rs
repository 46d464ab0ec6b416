//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod bus;

pub use bus::RegisterInterface;
