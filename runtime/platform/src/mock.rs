//! Fake register memory for host-side tests
//!
//! Each [`FakeBlock`] is a leaked, zero-initialised run of `u32` words. The
//! drivers access it through the same [`Mmio`](crate::Mmio) paths they use on
//! hardware, and tests poke status bits or inspect what was written.
//! Write-only and write-one-to-set registers simply hold the last value
//! written, so every driver write is also appended to a per-thread journal
//! that [`FakeBoard::take_writes`] returns in program order.

use core::cell::RefCell;
use std::boxed::Box;
use std::vec;
use std::vec::Vec;

use crate::Platform;

/// One block of fake registers
#[derive(Debug)]
pub struct FakeBlock {
    base: usize,
    words: usize,
}

impl FakeBlock {
    /// Covers PMC_PCER1/PCSR1 at 0x100..0x108
    pub const PMC_WORDS: usize = 0x50;
    /// Covers the two ISER banks
    pub const NVIC_WORDS: usize = 0x08;
    /// Covers PIO_ABSR at 0x70
    pub const PIO_WORDS: usize = 0x40;
    /// Covers the UART/USART registers the drivers touch
    pub const SERIAL_WORDS: usize = 0x40;

    pub fn new(words: usize) -> Self {
        let memory: &'static mut [u32] = Box::leak(vec![0u32; words].into_boxed_slice());
        Self {
            base: memory.as_mut_ptr() as usize,
            words,
        }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn read(&self, offset: usize) -> u32 {
        unsafe { core::ptr::read_volatile(self.slot(offset)) }
    }

    pub fn write(&self, offset: usize, value: u32) {
        unsafe { core::ptr::write_volatile(self.slot(offset), value) }
    }

    pub fn set_bits(&self, offset: usize, bits: u32) {
        self.write(offset, self.read(offset) | bits);
    }

    pub fn clear_bits(&self, offset: usize, bits: u32) {
        self.write(offset, self.read(offset) & !bits);
    }

    fn offset_of(&self, address: usize) -> Option<usize> {
        let offset = address.checked_sub(self.base)?;
        (offset < self.words * 4).then_some(offset)
    }

    fn slot(&self, offset: usize) -> *mut u32 {
        assert!(offset % 4 == 0, "unaligned register offset {:#x}", offset);
        assert!(offset / 4 < self.words, "register offset {:#x} outside fake block", offset);
        (self.base + offset) as *mut u32
    }
}

std::thread_local! {
    static JOURNAL: RefCell<Vec<(usize, u32)>> = const { RefCell::new(Vec::new()) };
}

/// Called by [`Mmio::write`](crate::Mmio::write) for every register write
pub(crate) fn record_write(address: usize, value: u32) {
    JOURNAL.with(|journal| journal.borrow_mut().push((address, value)));
}

/// Which fake block a journaled write landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Pmc,
    Nvic,
    Pio,
    Serial,
}

/// Fake PMC, NVIC, one PIO controller and one serial peripheral
#[derive(Debug)]
pub struct FakeBoard {
    pub pmc: FakeBlock,
    pub nvic: FakeBlock,
    pub pio: FakeBlock,
    pub serial: FakeBlock,
}

impl FakeBoard {
    pub fn new() -> Self {
        Self {
            pmc: FakeBlock::new(FakeBlock::PMC_WORDS),
            nvic: FakeBlock::new(FakeBlock::NVIC_WORDS),
            pio: FakeBlock::new(FakeBlock::PIO_WORDS),
            serial: FakeBlock::new(FakeBlock::SERIAL_WORDS),
        }
    }

    /// Platform whose PMC and NVIC point at this board's fake blocks
    pub fn platform(&self) -> Platform {
        // Fake blocks are leaked, so they outlive every Platform built here
        unsafe { Platform::new(self.pmc.base(), self.nvic.base()) }
    }

    /// Drain this thread's journal, keeping writes to this board's blocks
    ///
    /// Entries are `(block, offset, value)` in the order the drivers issued
    /// them. Writes made through [`FakeBlock::write`] are not journaled.
    pub fn take_writes(&self) -> Vec<(Block, usize, u32)> {
        let writes = JOURNAL.with(|journal| core::mem::take(&mut *journal.borrow_mut()));
        writes
            .into_iter()
            .filter_map(|(address, value)| {
                let (block, offset) = self.locate(address)?;
                Some((block, offset, value))
            })
            .collect()
    }

    fn locate(&self, address: usize) -> Option<(Block, usize)> {
        [
            (Block::Pmc, &self.pmc),
            (Block::Nvic, &self.nvic),
            (Block::Pio, &self.pio),
            (Block::Serial, &self.serial),
        ]
        .into_iter()
        .find_map(|(block, fake)| fake.offset_of(address).map(|offset| (block, offset)))
    }
}

impl Default for FakeBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClockControl, InterruptControl};

    #[test]
    fn test_journal_keeps_driver_order() {
        let board = FakeBoard::new();
        let other = FakeBoard::new();
        let platform = board.platform();

        board.serial.write(0x00, 0xFF);
        platform.nvic.enable_vector(3);
        other.platform().pmc.enable_peripheral_clock(9);
        platform.pmc.enable_peripheral_clock(8);

        assert_eq!(
            board.take_writes(),
            vec![(Block::Nvic, 0x00, 1 << 3), (Block::Pmc, 0x10, 1 << 8)]
        );
        assert!(board.take_writes().is_empty());
    }
}
