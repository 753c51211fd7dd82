//! Nested vectored interrupt controller (enable side only)

use crate::{InterruptControl, Mmio, Vector};

const NVIC_ISER: usize = 0x00;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nvic {
    iser: Mmio,
}

impl Nvic {
    /// # Safety
    /// `iser_base` must address NVIC_ISER0 (or memory standing in for the
    /// ISER bank), see [`Mmio::new`].
    pub const unsafe fn new(iser_base: usize) -> Self {
        Self {
            iser: Mmio::new(iser_base),
        }
    }
}

impl InterruptControl for Nvic {
    fn enable_vector(&self, vector: Vector) {
        let offset = NVIC_ISER + (vector as usize / 32) * 4;
        log::trace!("nvic: enable vector {}", vector);
        // Write-one-to-set: other vectors are unaffected
        self.iser.write(offset, 1 << (vector % 32));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::FakeBlock;

    #[test]
    fn test_enable_vector_bank_zero() {
        let block = FakeBlock::new(FakeBlock::NVIC_WORDS);
        let nvic = unsafe { Nvic::new(block.base()) };

        nvic.enable_vector(20);
        assert_eq!(block.read(0x00), 1 << 20);
    }

    #[test]
    fn test_enable_vector_bank_one() {
        let block = FakeBlock::new(FakeBlock::NVIC_WORDS);
        let nvic = unsafe { Nvic::new(block.base()) };

        nvic.enable_vector(40);
        assert_eq!(block.read(0x04), 1 << 8);
        assert_eq!(block.read(0x00), 0);
    }
}
