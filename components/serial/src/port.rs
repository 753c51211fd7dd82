//! The capability every serial channel provides

use core::fmt;

use crate::{Result, SerialError};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Serial port driver
///
/// Implementations own a receive queue and one peripheral. All methods take
/// `&self` because channels live in `static`s shared with their interrupt
/// handler.
///
/// Every formatted helper is built on [`write_byte`](Self::write_byte) and
/// blocks the same way it does.
pub trait PortDriver {
    /// Bring the peripheral up at `baud_divisor`
    ///
    /// Valid exactly once per channel.
    fn configure(&self, baud_divisor: u32) -> Result<()>;

    /// Transmit one byte, spinning until the transmitter is ready
    ///
    /// Never returns if the hardware never reports ready.
    fn write_byte(&self, byte: u8) -> Result<()>;

    /// Transmit one byte, polling the ready flag at most `spins` times
    fn write_byte_timeout(&self, byte: u8, spins: u32) -> Result<()>;

    /// Queue a received byte (interrupt context only, never blocks)
    fn push_received(&self, byte: u8);

    /// Take the oldest received byte
    fn read_byte(&self) -> Result<u8>;

    /// Number of received bytes waiting
    fn pending_count(&self) -> Result<usize>;

    /// Write every byte of `bytes`
    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Write bytes up to (not including) a NUL terminator or the end of `text`
    fn write_text(&self, text: &[u8]) -> Result<()> {
        for &byte in text.iter().take_while(|&&byte| byte != 0) {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    fn write_str(&self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Decimal ASCII, most significant digit first
    fn write_unsigned_decimal(&self, value: u32) -> Result<()> {
        // u32::MAX has ten digits
        let mut digits = [0u8; 10];
        let mut start = digits.len();
        let mut rest = value;
        loop {
            start -= 1;
            digits[start] = b'0' + (rest % 10) as u8;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }
        self.write_bytes(&digits[start..])
    }

    /// Decimal ASCII with a leading `-` for negative values
    fn write_signed_decimal(&self, value: i32) -> Result<()> {
        if value < 0 {
            self.write_byte(b'-')?;
        }
        self.write_unsigned_decimal(value.unsigned_abs())
    }

    /// Exactly eight uppercase hex digits, zero-padded
    fn write_hex32(&self, value: u32) -> Result<()> {
        for nibble in (0..8).rev() {
            let digit = (value >> (nibble * 4)) & 0xF;
            self.write_byte(HEX_DIGITS[digit as usize])?;
        }
        Ok(())
    }

    /// `core::fmt::Write` adapter for `write!`
    fn writer(&self) -> SerialWriter<'_, Self>
    where
        Self: Sized,
    {
        SerialWriter::new(self)
    }
}

/// Wrapper for using a [`PortDriver`] with `core::fmt::Write`
///
/// The last driver error is kept, since `fmt::Error` carries no detail.
pub struct SerialWriter<'a, P: PortDriver + ?Sized> {
    port: &'a P,
    error: Option<SerialError>,
}

impl<'a, P: PortDriver + ?Sized> SerialWriter<'a, P> {
    pub fn new(port: &'a P) -> Self {
        Self { port, error: None }
    }

    /// Driver error behind the most recent `fmt::Error`
    pub fn error(&self) -> Option<SerialError> {
        self.error
    }
}

impl<P: PortDriver + ?Sized> fmt::Write for SerialWriter<'_, P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.port.write_bytes(s.as_bytes()).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use core::fmt::Write;
    use std::string::String;
    use std::vec::Vec;

    /// Driver that records transmitted bytes
    pub(crate) struct RecordingPort {
        pub sent: RefCell<Vec<u8>>,
        pub stall_after: Cell<Option<usize>>,
    }

    impl RecordingPort {
        pub(crate) fn new() -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                stall_after: Cell::new(None),
            }
        }

        pub(crate) fn output(&self) -> String {
            String::from_utf8(self.sent.borrow().clone()).unwrap()
        }
    }

    impl PortDriver for RecordingPort {
        fn configure(&self, _baud_divisor: u32) -> Result<()> {
            Ok(())
        }

        fn write_byte(&self, byte: u8) -> Result<()> {
            self.write_byte_timeout(byte, u32::MAX)
        }

        fn write_byte_timeout(&self, byte: u8, spins: u32) -> Result<()> {
            if let Some(limit) = self.stall_after.get() {
                if self.sent.borrow().len() >= limit {
                    return Err(SerialError::TransmitTimeout { spins });
                }
            }
            self.sent.borrow_mut().push(byte);
            Ok(())
        }

        fn push_received(&self, _byte: u8) {}

        fn read_byte(&self) -> Result<u8> {
            Err(SerialError::EmptyQueue)
        }

        fn pending_count(&self) -> Result<usize> {
            Ok(0)
        }
    }

    fn output_of(f: impl FnOnce(&RecordingPort) -> Result<()>) -> String {
        let port = RecordingPort::new();
        f(&port).unwrap();
        port.output()
    }

    #[test]
    fn test_unsigned_decimal() {
        assert_eq!(output_of(|p| p.write_unsigned_decimal(0)), "0");
        assert_eq!(output_of(|p| p.write_unsigned_decimal(7)), "7");
        assert_eq!(output_of(|p| p.write_unsigned_decimal(12345)), "12345");
        assert_eq!(output_of(|p| p.write_unsigned_decimal(1_000_000)), "1000000");
        assert_eq!(output_of(|p| p.write_unsigned_decimal(u32::MAX)), "4294967295");
    }

    #[test]
    fn test_signed_decimal() {
        assert_eq!(output_of(|p| p.write_signed_decimal(0)), "0");
        assert_eq!(output_of(|p| p.write_signed_decimal(42)), "42");
        assert_eq!(output_of(|p| p.write_signed_decimal(-42)), "-42");
        assert_eq!(output_of(|p| p.write_signed_decimal(i32::MIN)), "-2147483648");
    }

    #[test]
    fn test_hex32() {
        assert_eq!(output_of(|p| p.write_hex32(0)), "00000000");
        assert_eq!(output_of(|p| p.write_hex32(0xDEAD_BEEF)), "DEADBEEF");
        assert_eq!(output_of(|p| p.write_hex32(0x1A)), "0000001A");
        assert_eq!(output_of(|p| p.write_hex32(u32::MAX)), "FFFFFFFF");
    }

    #[test]
    fn test_text_stops_at_nul() {
        assert_eq!(output_of(|p| p.write_text(b"hello\0world")), "hello");
        assert_eq!(output_of(|p| p.write_text(b"no terminator")), "no terminator");
        assert_eq!(output_of(|p| p.write_text(b"\0")), "");
        assert_eq!(output_of(|p| p.write_str("rust str")), "rust str");
    }

    #[test]
    fn test_fmt_writer() {
        let port = RecordingPort::new();
        write!(port.writer(), "t={} h={:#x}\r\n", 17, 255).unwrap();
        assert_eq!(port.output(), "t=17 h=0xff\r\n");
    }

    #[test]
    fn test_stall_propagates() {
        let port = RecordingPort::new();
        port.stall_after.set(Some(2));

        let err = port.write_unsigned_decimal(12345).unwrap_err();
        assert!(matches!(err, SerialError::TransmitTimeout { .. }));
        assert_eq!(port.output(), "12");

        let mut writer = port.writer();
        assert!(write!(writer, "more").is_err());
        assert!(matches!(writer.error(), Some(SerialError::TransmitTimeout { .. })));
    }
}
