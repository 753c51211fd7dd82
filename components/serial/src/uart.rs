//! Primary UART channel (USB and RX0/TX0 on the Due)
//!
//! Fixed pin pair PA8/PA9 on mux group A. The UART mode register only carries
//! parity and channel mode; character length and stop bits are fixed at 8N1
//! by the hardware.

use lightboard_platform::board::{ID_UART, PA8A_URXD, PA9A_UTXD, PIOA_BASE, UART_BASE, UART_IRQ};
use lightboard_platform::regs::uart::*;
use lightboard_platform::{
    ClockControl, InterruptControl, Mmio, MuxGroup, PinControl, Pio, Platform, Vector,
};
use lightboard_queue::QUEUE_SIZE;

use crate::channel::{wait_ready, wait_ready_forever, ChannelCore, ChannelState};
use crate::{DispatchTable, InterruptSource, PortDriver, Result, SerialError};

const PINS: u32 = PA8A_URXD | PA9A_UTXD;

/// UART driver with an `N`-slot receive queue
pub struct UartChannel<const N: usize = QUEUE_SIZE> {
    regs: Mmio,
    pio: Pio,
    platform: Platform,
    table: &'static DispatchTable,
    core: ChannelCore<N>,
}

impl<const N: usize> UartChannel<N> {
    /// Channel on the real UART and PIOA
    ///
    /// # Safety
    /// `platform` must describe the real PMC and NVIC. Only one channel may
    /// drive the UART.
    pub const unsafe fn new(platform: Platform, table: &'static DispatchTable) -> Self {
        Self::with_blocks(UART_BASE, PIOA_BASE, platform, table)
    }

    /// Channel on explicit register blocks
    ///
    /// # Safety
    /// `uart_base` and `pio_base` must satisfy [`Mmio::new`] for the UART and
    /// PIO register layouts.
    pub const unsafe fn with_blocks(
        uart_base: usize,
        pio_base: usize,
        platform: Platform,
        table: &'static DispatchTable,
    ) -> Self {
        Self {
            regs: Mmio::new(uart_base),
            pio: Pio::new(pio_base),
            platform,
            table,
            core: ChannelCore::new(),
        }
    }

    pub fn state(&self) -> ChannelState {
        self.core.state()
    }

    /// Divisor programmed by `configure`, `None` until running
    pub fn baud_divisor(&self) -> Option<u32> {
        self.core.baud_divisor()
    }

    #[inline]
    fn status(&self) -> Status {
        Status::from_bits_truncate(self.regs.read(UART_SR))
    }

    #[inline]
    fn tx_ready(&self) -> bool {
        self.status().contains(Status::TXRDY)
    }
}

impl<const N: usize> PortDriver for UartChannel<N> {
    fn configure(&self, baud_divisor: u32) -> Result<()> {
        self.core.check_configurable(baud_divisor, BRGR_CD_MAX)?;
        if !self.table.is_bound(self) {
            log::warn!("uart: configure before vector {} was registered", UART_IRQ);
            return Err(SerialError::VectorNotRegistered { vector: UART_IRQ });
        }
        self.core.begin_configure(baud_divisor)?;

        self.platform.pmc.enable_peripheral_clock(ID_UART);

        // Pins leave PIO control before the peripheral is touched
        self.pio.disable_gpio(PINS);
        self.regs.write(UART_CR, (Control::RSTRX | Control::RSTTX).bits());
        self.pio.select_peripheral(PINS, MuxGroup::A);
        self.pio.enable_pull_up(PINS);

        self.regs.write(UART_BRGR, baud_divisor);
        self.regs.write(UART_MR, MR_PAR_NO | MR_CHMODE_NORMAL);

        // Interrupt armed before the receiver so no byte goes unhandled
        self.regs.write(UART_IER, Status::RXRDY.bits());
        self.platform.nvic.enable_vector(UART_IRQ);
        self.regs.write(UART_CR, (Control::RXEN | Control::TXEN).bits());

        self.core.finish_configure();
        log::debug!("uart: running (divisor {}, vector {})", baud_divisor, UART_IRQ);
        Ok(())
    }

    fn write_byte(&self, byte: u8) -> Result<()> {
        self.core.require_running()?;
        wait_ready_forever(|| self.tx_ready());
        self.regs.write(UART_THR, byte as u32);
        Ok(())
    }

    fn write_byte_timeout(&self, byte: u8, spins: u32) -> Result<()> {
        self.core.require_running()?;
        wait_ready(|| self.tx_ready(), spins)?;
        self.regs.write(UART_THR, byte as u32);
        Ok(())
    }

    #[inline]
    fn push_received(&self, byte: u8) {
        self.core.push(byte);
    }

    fn read_byte(&self) -> Result<u8> {
        self.core.read()
    }

    fn pending_count(&self) -> Result<usize> {
        self.core.pending()
    }
}

impl<const N: usize> InterruptSource for UartChannel<N> {
    fn vector(&self) -> Vector {
        UART_IRQ
    }

    fn service(&self) {
        // Reading UART_SR acknowledges the interrupt
        let status = self.status();
        if status.contains(Status::RXRDY) {
            self.push_received(self.regs.read(UART_RHR) as u8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightboard_platform::mock::{Block, FakeBoard};
    use std::boxed::Box;

    const PIO_PDR: usize = 0x04;
    const PIO_PUER: usize = 0x64;
    const PIO_ABSR: usize = 0x70;
    const PMC_PCER0: usize = 0x10;

    fn fake_channel(board: &FakeBoard) -> &'static UartChannel {
        let table: &'static DispatchTable = Box::leak(Box::new(DispatchTable::new()));
        let channel: &'static UartChannel = Box::leak(Box::new(unsafe {
            UartChannel::with_blocks(board.serial.base(), board.pio.base(), board.platform(), table)
        }));
        table.register(channel).unwrap();
        channel
    }

    #[test]
    fn test_configure_programs_registers() {
        let board = FakeBoard::new();
        board.pio.write(PIO_ABSR, PINS);
        let uart = fake_channel(&board);

        uart.configure(46).unwrap();

        assert_eq!(uart.state(), ChannelState::Running);
        assert_eq!(uart.baud_divisor(), Some(46));
        assert_eq!(board.pmc.read(PMC_PCER0), 1 << ID_UART);
        assert_eq!(board.pio.read(PIO_PDR), PINS);
        assert_eq!(board.pio.read(PIO_ABSR) & PINS, 0);
        assert_eq!(board.pio.read(PIO_PUER), PINS);
        assert_eq!(board.serial.read(UART_BRGR), 46);
        assert_eq!(board.serial.read(UART_MR), MR_PAR_NO);
        assert_eq!(board.serial.read(UART_IER), Status::RXRDY.bits());
        assert_eq!(board.serial.read(UART_CR), (Control::RXEN | Control::TXEN).bits());
        assert_eq!(board.nvic.read(0x00), 1 << UART_IRQ);
    }

    #[test]
    fn test_configure_write_order() {
        let board = FakeBoard::new();
        let uart = fake_channel(&board);
        board.take_writes();

        uart.configure(46).unwrap();

        assert_eq!(
            board.take_writes(),
            std::vec![
                (Block::Pmc, PMC_PCER0, 1 << ID_UART),
                (Block::Pio, PIO_PDR, PINS),
                (Block::Serial, UART_CR, (Control::RSTRX | Control::RSTTX).bits()),
                (Block::Pio, PIO_ABSR, 0),
                (Block::Pio, PIO_PUER, PINS),
                (Block::Serial, UART_BRGR, 46),
                (Block::Serial, UART_MR, MR_PAR_NO | MR_CHMODE_NORMAL),
                (Block::Serial, UART_IER, Status::RXRDY.bits()),
                (Block::Nvic, 0x00, 1 << UART_IRQ),
                (Block::Serial, UART_CR, (Control::RXEN | Control::TXEN).bits()),
            ]
        );
    }

    #[test]
    fn test_write_byte_waits_for_txrdy() {
        let board = FakeBoard::new();
        let uart = fake_channel(&board);
        uart.configure(46).unwrap();

        assert_eq!(
            uart.write_byte_timeout(b'x', 10),
            Err(SerialError::TransmitTimeout { spins: 10 })
        );
        assert_eq!(board.serial.read(UART_THR), 0);

        board.serial.set_bits(UART_SR, Status::TXRDY.bits());
        uart.write_byte(b'A').unwrap();
        assert_eq!(board.serial.read(UART_THR), b'A' as u32);
        uart.write_byte_timeout(b'B', 1).unwrap();
        assert_eq!(board.serial.read(UART_THR), b'B' as u32);
    }

    #[test]
    fn test_service_reads_rhr() {
        let board = FakeBoard::new();
        let uart = fake_channel(&board);
        uart.configure(46).unwrap();

        board.serial.write(UART_RHR, 0x5A);
        uart.service();
        assert_eq!(uart.pending_count(), Ok(0));

        board.serial.set_bits(UART_SR, Status::RXRDY.bits());
        uart.service();
        assert_eq!(uart.pending_count(), Ok(1));
        assert_eq!(uart.read_byte(), Ok(0x5A));
    }

    #[test]
    fn test_unregistered_channel_refuses_configure() {
        let board = FakeBoard::new();
        let table: &'static DispatchTable = Box::leak(Box::new(DispatchTable::new()));
        let uart: UartChannel = unsafe {
            UartChannel::with_blocks(board.serial.base(), board.pio.base(), board.platform(), table)
        };

        assert_eq!(
            uart.configure(46),
            Err(SerialError::VectorNotRegistered { vector: UART_IRQ })
        );
        assert_eq!(uart.state(), ChannelState::Uninitialized);
        assert_eq!(board.serial.read(UART_CR), 0);
        assert!(board.take_writes().is_empty());
    }
}
