//! Power management controller (peripheral clock gates)

use crate::{ClockControl, Mmio, PeripheralId};

const PMC_PCER0: usize = 0x10;
const PMC_PCER1: usize = 0x100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pmc {
    regs: Mmio,
}

impl Pmc {
    /// # Safety
    /// `base` must address the PMC register block, see [`Mmio::new`].
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            regs: Mmio::new(base),
        }
    }

    /// Ids 0..31 live in the `*0` registers, 32.. in the `*1` registers
    fn locate(id: PeripheralId, low: usize, high: usize) -> (usize, u32) {
        if id < 32 {
            (low, 1 << id)
        } else {
            (high, 1 << (id - 32))
        }
    }
}

impl ClockControl for Pmc {
    fn enable_peripheral_clock(&self, id: PeripheralId) {
        let (offset, bit) = Self::locate(id, PMC_PCER0, PMC_PCER1);
        log::trace!("pmc: enable peripheral clock {}", id);
        self.regs.write(offset, bit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::FakeBlock;

    #[test]
    fn test_enable_low_id() {
        let block = FakeBlock::new(FakeBlock::PMC_WORDS);
        let pmc = unsafe { Pmc::new(block.base()) };

        pmc.enable_peripheral_clock(8);
        assert_eq!(block.read(PMC_PCER0), 1 << 8);
        assert_eq!(block.read(PMC_PCER1), 0);
    }

    #[test]
    fn test_enable_high_id() {
        let block = FakeBlock::new(FakeBlock::PMC_WORDS);
        let pmc = unsafe { Pmc::new(block.base()) };

        pmc.enable_peripheral_clock(33);
        assert_eq!(block.read(PMC_PCER1), 1 << 1);
        assert_eq!(block.read(PMC_PCER0), 0);
    }

}
