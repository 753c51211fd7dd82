//! SAM3X8E (Arduino Due) addresses, peripheral ids and pin masks

use crate::{PeripheralId, Vector};

// System blocks
pub const PMC_BASE: usize = 0x400E_0600;
pub const NVIC_ISER_BASE: usize = 0xE000_E100;

// Pin controllers
pub const PIOA_BASE: usize = 0x400E_0E00;
pub const PIOD_BASE: usize = 0x400E_1400;

// Serial peripherals
pub const UART_BASE: usize = 0x400E_0800;
pub const USART0_BASE: usize = 0x4009_8000;
pub const USART1_BASE: usize = 0x4009_C000;
pub const USART3_BASE: usize = 0x400A_4000;

// Peripheral identifiers (PMC clock gate bit and NVIC vector share the number)
pub const ID_UART: PeripheralId = 8;
pub const ID_USART0: PeripheralId = 17;
pub const ID_USART1: PeripheralId = 18;
pub const ID_USART3: PeripheralId = 20;

pub const UART_IRQ: Vector = 8;
pub const USART0_IRQ: Vector = 17;
pub const USART1_IRQ: Vector = 18;
pub const USART3_IRQ: Vector = 20;

/// Number of peripheral interrupt vectors on the SAM3X8E
pub const PERIPHERAL_VECTORS: usize = 45;

// Pin masks within their PIO controller
pub const PA8A_URXD: u32 = 1 << 8;
pub const PA9A_UTXD: u32 = 1 << 9;
pub const PA10A_RXD0: u32 = 1 << 10;
pub const PA11A_TXD0: u32 = 1 << 11;
pub const PA12A_RXD1: u32 = 1 << 12;
pub const PA13A_TXD1: u32 = 1 << 13;
pub const PD5B_RXD3: u32 = 1 << 5;
pub const PD4B_TXD3: u32 = 1 << 4;
