//! Build-time serial configuration
//!
//! Parity is always none. Stop bits and character length are fixed per
//! channel type (the UART uses its reset defaults, USARTs program 8N1).

pub use lightboard_queue::QUEUE_SIZE;

/// Peripheral (master) clock feeding the baud rate generators
pub const MASTER_CLOCK_HZ: u32 = 84_000_000;

pub const DEFAULT_BAUD: u32 = 115_200;

/// `DEFAULT_BAUD` at `MASTER_CLOCK_HZ`
pub const DEFAULT_BAUD_DIVISOR: u32 = baud_divisor(MASTER_CLOCK_HZ, DEFAULT_BAUD);

/// Polls of the transmit-ready flag before `write_byte_timeout` callers
/// usually give up
pub const DEFAULT_TX_SPIN_LIMIT: u32 = 100_000;

/// Baud rate generator clock divisor: `clock / (16 * baud)`, rounded
///
/// Returns 0 for a zero baud rate, which `configure` rejects.
pub const fn baud_divisor(clock_hz: u32, baud: u32) -> u32 {
    if baud == 0 {
        return 0;
    }
    let sample_clock = 16 * baud as u64;
    ((clock_hz as u64 + sample_clock / 2) / sample_clock) as u32
}
