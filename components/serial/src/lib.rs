//! Serial Channels - Interrupt-fed UART/USART drivers for the SAM3X8E
//!
//! # Purpose
//! Moves bytes between interrupt context (receive) and foreground context
//! (consume/transmit) on a bare-metal target with no allocator.
//!
//! # Integration Points
//! - Depends on: `lightboard-queue` (receive buffering), `lightboard-platform` (registers)
//! - Provides to: application code (formatted output, `read_byte`/`pending_count`)
//! - Interrupt vectors: `UART_Handler`, `USART0_Handler`, `USART1_Handler`, `USART3_Handler`
//!
//! # Architecture
//! Each channel implements [`PortDriver`] and owns one receive queue:
//!
//! ```text
//! RX interrupt -> DispatchTable -> InterruptSource::service -> push_received -> queue
//! foreground   -> read_byte / pending_count                               <- queue
//! foreground   -> write_* -> write_byte -> spin on TXRDY -> THR
//! ```
//!
//! # Initialization Order
//! 1. Clock and board bring-up (external)
//! 2. [`ports::init`] registers every board channel with the dispatch table
//! 3. `configure(divisor)` once per channel arms its interrupt
//!
//! `configure` refuses to run for a channel that is not registered, so no
//! byte can arrive on a vector without a handler.

#![no_std]

#[cfg(test)]
extern crate std;

// Pulls in the single-core critical-section implementation
#[cfg(all(target_arch = "arm", target_os = "none"))]
use cortex_m as _;

mod channel;
pub mod config;
mod dispatch;
mod error;
mod logger;
mod port;
pub mod ports;
mod uart;
mod usart;

pub use channel::ChannelState;
pub use dispatch::{DispatchTable, InterruptSource};
pub use error::{Result, SerialError};
pub use logger::SerialLogger;
pub use port::{PortDriver, SerialWriter};
pub use uart::UartChannel;
pub use usart::{PeripheralDescriptor, UsartChannel, USART0, USART1, USART3};

pub use lightboard_platform::{MuxGroup, Platform, Vector};
pub use lightboard_queue::QUEUE_SIZE;
