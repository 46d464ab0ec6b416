//! Mock register bus implementation for testing

use crate::platform::{error::SpiError, traits::RegisterInterface, PlatformError, Result};
use heapless::{Deque, Vec};

const TRANSACTION_CAPACITY: usize = 32;
const READ_QUEUE_CAPACITY: usize = 64;
const FAIL_LIST_CAPACITY: usize = 8;

/// Bus transaction record for test verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusTransaction {
    /// Single-register write
    Write { reg: u8, value: u8 },
    /// Burst read
    Read { reg: u8, len: usize },
}

/// Mock register bus
///
/// Records all transactions for test verification, returns
/// pre-programmed read bytes, and injects transport failures either
/// globally or for individual register addresses.
#[derive(Debug)]
pub struct MockRegisterBus {
    transactions: Vec<BusTransaction, TRANSACTION_CAPACITY>,
    read_data: Deque<u8, READ_QUEUE_CAPACITY>,
    failing_registers: Vec<u8, FAIL_LIST_CAPACITY>,
    fail_all: bool,
}

impl MockRegisterBus {
    /// Create a new mock bus
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            read_data: Deque::new(),
            failing_registers: Vec::new(),
            fail_all: false,
        }
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> &[BusTransaction] {
        &self.transactions
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Append bytes to return for subsequent read operations
    ///
    /// Bytes are consumed in order across reads. When the queue runs
    /// dry the remaining buffer bytes are left untouched.
    pub fn queue_read_data(&mut self, data: &[u8]) {
        for &byte in data {
            let _ = self.read_data.push_back(byte);
        }
    }

    /// Make every operation on `reg` fail with a transport error
    pub fn fail_register(&mut self, reg: u8) {
        let _ = self.failing_registers.push(reg);
    }

    /// Make every operation fail with a transport error
    pub fn set_fail_all(&mut self, fail: bool) {
        self.fail_all = fail;
    }

    fn should_fail(&self, reg: u8) -> bool {
        self.fail_all || self.failing_registers.contains(&reg)
    }
}

impl Default for MockRegisterBus {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterInterface for MockRegisterBus {
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        let _ = self.transactions.push(BusTransaction::Write { reg, value });
        if self.should_fail(reg) {
            return Err(PlatformError::Spi(SpiError::TransferFailed));
        }
        Ok(())
    }

    fn read_registers(&mut self, reg: u8, buffer: &mut [u8]) -> Result<()> {
        let _ = self.transactions.push(BusTransaction::Read {
            reg,
            len: buffer.len(),
        });
        if self.should_fail(reg) {
            return Err(PlatformError::Spi(SpiError::TransferFailed));
        }
        for slot in buffer.iter_mut() {
            if let Some(byte) = self.read_data.pop_front() {
                *slot = byte;
            }
        }
        Ok(())
    }
}
