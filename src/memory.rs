//! In-memory register transport.
//!
//! Holds a register block in RAM instead of talking to a device. Every
//! successful write is recorded in a bounded history (oldest entries are
//! dropped when full), and a write failure can be scheduled to exercise
//! error paths or dry-run a fade.

use heapless::Deque;

use crate::RegisterDriver;
use crate::register::{RegisterBlock, dark_block};

/// Error reported by [`MemoryRegisters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    /// Read rejected by a scheduled failure
    ReadRejected,
    /// Write rejected by a scheduled failure
    WriteRejected,
}

impl core::fmt::Display for MemoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ReadRejected => write!(f, "register read rejected"),
            Self::WriteRejected => write!(f, "register write rejected"),
        }
    }
}

impl core::error::Error for MemoryError {}

/// Register block kept in memory
///
/// `HISTORY` is the number of written blocks remembered and must be non-zero.
#[derive(Debug, Clone)]
pub struct MemoryRegisters<const HISTORY: usize> {
    registers: RegisterBlock,
    history: Deque<RegisterBlock, HISTORY>,
    reads: usize,
    writes: usize,
    fail_read: bool,
    fail_write_at: Option<usize>,
}

impl<const HISTORY: usize> MemoryRegisters<HISTORY> {
    /// Create a transport holding `registers`
    pub const fn new(registers: RegisterBlock) -> Self {
        Self {
            registers,
            history: Deque::new(),
            reads: 0,
            writes: 0,
            fail_read: false,
            fail_write_at: None,
        }
    }

    /// Create a transport with every channel off
    pub const fn dark() -> Self {
        Self::new(dark_block())
    }

    /// Reject every read
    #[must_use]
    pub const fn with_failing_reads(mut self) -> Self {
        self.fail_read = true;
        self
    }

    /// Reject the write with zero-based number `attempt`, and all after it
    #[must_use]
    pub const fn with_failing_write(mut self, attempt: usize) -> Self {
        self.fail_write_at = Some(attempt);
        self
    }

    /// Current register contents
    pub const fn registers(&self) -> &RegisterBlock {
        &self.registers
    }

    /// Recorded writes, oldest first
    pub fn history(&self) -> impl Iterator<Item = &RegisterBlock> {
        self.history.iter()
    }

    /// Number of read attempts
    pub const fn reads(&self) -> usize {
        self.reads
    }

    /// Number of write attempts, including rejected ones
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl<const HISTORY: usize> Default for MemoryRegisters<HISTORY> {
    fn default() -> Self {
        Self::dark()
    }
}

impl<const HISTORY: usize> RegisterDriver for MemoryRegisters<HISTORY> {
    type Error = MemoryError;

    fn read_all(&mut self) -> Result<RegisterBlock, Self::Error> {
        self.reads += 1;
        if self.fail_read {
            return Err(MemoryError::ReadRejected);
        }
        Ok(self.registers)
    }

    fn write_all(&mut self, block: &RegisterBlock) -> Result<(), Self::Error> {
        let attempt = self.writes;
        self.writes += 1;
        if self.fail_write_at.is_some_and(|fail_at| attempt >= fail_at) {
            return Err(MemoryError::WriteRejected);
        }

        self.registers = *block;
        if self.history.is_full() {
            self.history.pop_front();
        }
        // Cannot fail, a slot was freed above
        let _ = self.history.push_back(*block);
        Ok(())
    }
}
