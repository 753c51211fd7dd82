//! UART (the single debug/USB serial peripheral)

use bitflags::bitflags;

pub const UART_CR: usize = 0x00; // Control (write-only)
pub const UART_MR: usize = 0x04; // Mode
pub const UART_IER: usize = 0x08; // Interrupt enable (write-only)
pub const UART_IDR: usize = 0x0C; // Interrupt disable (write-only)
pub const UART_SR: usize = 0x14; // Status (read-only)
pub const UART_RHR: usize = 0x18; // Receive holding
pub const UART_THR: usize = 0x1C; // Transmit holding
pub const UART_BRGR: usize = 0x20; // Baud rate generator

bitflags! {
    /// UART_CR bits
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
    /// UART_SR bits (UART_IER/IDR use the same positions)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u32 {
        const RXRDY = 1 << 0;
        const TXRDY = 1 << 1;
        const ENDRX = 1 << 3;
        const ENDTX = 1 << 4;
        const OVRE = 1 << 5;
        const FRAME = 1 << 6;
        const PARE = 1 << 7;
        const TXEMPTY = 1 << 9;
    }
}

/// UART_MR.PAR = no parity
pub const MR_PAR_NO: u32 = 0x4 << 9;
/// UART_MR.CHMODE = normal
pub const MR_CHMODE_NORMAL: u32 = 0x0 << 14;

/// UART_BRGR.CD is 16 bits wide
pub const BRGR_CD_MAX: u32 = 0xFFFF;
