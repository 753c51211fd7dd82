//! USART (USART0..USART3)

use bitflags::bitflags;

pub const US_CR: usize = 0x00; // Control (write-only)
pub const US_MR: usize = 0x04; // Mode
pub const US_IER: usize = 0x08; // Interrupt enable (write-only)
pub const US_IDR: usize = 0x0C; // Interrupt disable (write-only)
pub const US_CSR: usize = 0x14; // Channel status (read-only)
pub const US_RHR: usize = 0x18; // Receive holding
pub const US_THR: usize = 0x1C; // Transmit holding
pub const US_BRGR: usize = 0x20; // Baud rate generator

bitflags! {
    /// US_CR bits used in asynchronous mode
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Control: u32 {
        const RSTRX = 1 << 2;
        const RSTTX = 1 << 3;
        const RXEN = 1 << 4;
        const RXDIS = 1 << 5;
        const TXEN = 1 << 6;
        const TXDIS = 1 << 7;
        const RSTSTA = 1 << 8;
    }
}

bitflags! {
    /// US_CSR bits (US_IER/IDR use the same positions)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u32 {
        const RXRDY = 1 << 0;
        const TXRDY = 1 << 1;
        const RXBRK = 1 << 2;
        const OVRE = 1 << 5;
        const FRAME = 1 << 6;
        const PARE = 1 << 7;
        const TIMEOUT = 1 << 8;
        const TXEMPTY = 1 << 9;
    }
}

/// US_MR.USART_MODE = normal
pub const MR_MODE_NORMAL: u32 = 0x0;
/// US_MR.USCLKS = peripheral clock
pub const MR_USCLKS_MCK: u32 = 0x0 << 4;
/// US_MR.CHRL = 8 data bits
pub const MR_CHRL_8_BIT: u32 = 0x3 << 6;
/// US_MR.PAR = no parity
pub const MR_PAR_NO: u32 = 0x4 << 9;
/// US_MR.NBSTOP = 1 stop bit
pub const MR_NBSTOP_1_BIT: u32 = 0x0 << 12;
/// US_MR.CHMODE = normal
pub const MR_CHMODE_NORMAL: u32 = 0x0 << 14;

/// US_BRGR.CD is 16 bits wide
pub const BRGR_CD_MAX: u32 = 0xFFFF;
