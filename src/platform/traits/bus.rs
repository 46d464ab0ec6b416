//! Register bus interface trait
//!
//! This module defines the register-addressed device interface that
//! platform implementations must provide.

use crate::platform::Result;

/// Register-addressed device interface
///
/// A value implementing this trait is a device handle: one selected chip
/// on a serial bus. Binding the bus and selecting the chip happen in the
/// implementation's constructor; the handle is then moved into a driver,
/// which owns it for the life of the process.
///
/// # Safety Invariants
///
/// - The underlying bus transaction is not re-entrant: a register
///   operation must complete before the next begins. Both methods take
///   `&mut self`, so exclusive ownership of the handle serializes access.
/// - Only one owner per device handle.
pub trait RegisterInterface {
    /// Write a single register
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Spi` if the device does not respond or the
    /// bus transaction fails.
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()>;

    /// Burst-read consecutive registers starting at `reg`
    ///
    /// Fills `buffer` with one byte per register. A burst is a single bus
    /// transaction, so a multi-axis sample read this way is time-coherent.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Spi` if the device does not respond or the
    /// bus transaction fails. The buffer contents are unspecified on error.
    fn read_registers(&mut self, reg: u8, buffer: &mut [u8]) -> Result<()>;
}
