//! # SAM3X8E Platform Layer
//!
//! Register-level access to the blocks the serial drivers touch:
//! - **PMC**: peripheral clock gates
//! - **PIO**: pin multiplexing and pull-ups
//! - **NVIC**: interrupt vector enables
//! - **UART/USART**: register offsets and bit definitions ([`regs`])
//!
//! The drivers only see the collaborator traits ([`ClockControl`],
//! [`PinControl`], [`InterruptControl`]) and a [`Platform`] value carrying
//! the PMC and NVIC blocks.
//!
//! ## Build Modes
//!
//! ```bash
//! # Hardware (default)
//! cargo build --target thumbv7m-none-eabi
//!
//! # Fake register memory for host tests
//! cargo test --features mock
//! ```

#![no_std]

#[cfg(any(test, feature = "mock"))]
extern crate std;

pub mod board;
mod mmio;
mod nvic;
mod pio;
mod pmc;
pub mod regs;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use mmio::Mmio;
pub use nvic::Nvic;
pub use pio::Pio;
pub use pmc::Pmc;

/// Peripheral identifier as used by the PMC clock gates
pub type PeripheralId = u8;

/// Peripheral interrupt vector number (NVIC IRQn)
pub type Vector = u8;

/// Alternate function group a PIO pin is switched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuxGroup {
    /// Peripheral A (PIO_ABSR bit clear)
    A,
    /// Peripheral B (PIO_ABSR bit set)
    B,
}

/// Peripheral clock gating
pub trait ClockControl {
    fn enable_peripheral_clock(&self, id: PeripheralId);
}

/// Pin multiplexing, one operation per register the drivers program
pub trait PinControl {
    /// Take pins away from the PIO controller
    fn disable_gpio(&self, pins: u32);

    /// Route pins to alternate function group `group`
    fn select_peripheral(&self, pins: u32, group: MuxGroup);

    fn enable_pull_up(&self, pins: u32);
}

/// Interrupt controller
pub trait InterruptControl {
    fn enable_vector(&self, vector: Vector);
}

/// System blocks shared by every serial channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub pmc: Pmc,
    pub nvic: Nvic,
}

impl Platform {
    /// The real SAM3X8E blocks
    pub const SAM3X8E: Platform = unsafe { Platform::new(board::PMC_BASE, board::NVIC_ISER_BASE) };

    /// # Safety
    /// Both addresses must satisfy [`Mmio::new`].
    pub const unsafe fn new(pmc_base: usize, nvic_iser_base: usize) -> Self {
        Self {
            pmc: Pmc::new(pmc_base),
            nvic: Nvic::new(nvic_iser_base),
        }
    }
}
