//! Register maps for the two serial peripheral families
//!
//! The UART and the USARTs share offsets for the registers the drivers use
//! but differ in mode-register fields and status bits.

pub mod uart;
pub mod usart;
