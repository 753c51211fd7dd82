//! Volatile access to memory-mapped register blocks

use core::ptr::{read_volatile, write_volatile};

/// Base address of a 32-bit register block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mmio {
    base: usize,
}

impl Mmio {
    /// Create an accessor for the block at `base`
    ///
    /// # Safety
    /// `base` must be the address of a register block (or memory standing in
    /// for one) that stays valid for reads and writes at every offset the
    /// caller uses, for the rest of the program.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    pub const fn base(&self) -> usize {
        self.base
    }

    /// Read a register
    #[inline]
    pub fn read(&self, offset: usize) -> u32 {
        unsafe { read_volatile((self.base + offset) as *const u32) }
    }

    /// Write a register
    #[inline]
    pub fn write(&self, offset: usize, value: u32) {
        #[cfg(any(test, feature = "mock"))]
        crate::mock::record_write(self.base + offset, value);
        unsafe { write_volatile((self.base + offset) as *mut u32, value) }
    }

    /// Read-modify-write a register
    #[inline]
    pub fn modify(&self, offset: usize, f: impl FnOnce(u32) -> u32) {
        let value = self.read(offset);
        self.write(offset, f(value));
    }
}
