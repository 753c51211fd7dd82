//! `log` backend that writes records to a serial channel

use core::fmt::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::{PortDriver, SerialWriter};

/// Writes each record as `[LEVEL] target: message\r\n`
///
/// Records are dropped while the port is not running, and a stalled
/// transmitter blocks the caller the same way `write_byte` does.
pub struct SerialLogger<P: PortDriver + Sync + 'static> {
    port: &'static P,
    level: LevelFilter,
}

impl<P: PortDriver + Sync + 'static> SerialLogger<P> {
    pub const fn new(port: &'static P, level: LevelFilter) -> Self {
        Self { port, level }
    }

    /// Install as the global logger
    pub fn install(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.level);
        Ok(())
    }
}

impl<P: PortDriver + Sync + 'static> Log for SerialLogger<P> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut out = SerialWriter::new(self.port);
        let _ = write!(
            out,
            "[{}] {}: {}\r\n",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}
