//! Parallel I/O controller (pin multiplexing and pull-ups)

use crate::{Mmio, MuxGroup, PinControl};

const PIO_PDR: usize = 0x04;
const PIO_PUER: usize = 0x64;
const PIO_ABSR: usize = 0x70;

/// One PIO controller (PIOA..PIOD)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pio {
    regs: Mmio,
}

impl Pio {
    /// # Safety
    /// `base` must address a PIO register block, see [`Mmio::new`].
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            regs: Mmio::new(base),
        }
    }

    pub const fn base(&self) -> usize {
        self.regs.base()
    }
}

impl PinControl for Pio {
    fn disable_gpio(&self, pins: u32) {
        self.regs.write(PIO_PDR, pins);
    }

    fn select_peripheral(&self, pins: u32, group: MuxGroup) {
        match group {
            MuxGroup::A => self.regs.modify(PIO_ABSR, |absr| absr & !pins),
            MuxGroup::B => self.regs.modify(PIO_ABSR, |absr| absr | pins),
        }
    }

    fn enable_pull_up(&self, pins: u32) {
        self.regs.write(PIO_PUER, pins);
    }
}
