//! USART channels (USART0, USART1, USART3 on the Due headers)
//!
//! One driver type for every USART, parameterised by a
//! [`PeripheralDescriptor`]. The peripherals differ only in addresses, ids and
//! pin mux group: USART3's pins sit on PIOD group B, the others on PIOA
//! group A.

use lightboard_platform::board::{
    ID_USART0, ID_USART1, ID_USART3, PA10A_RXD0, PA11A_TXD0, PA12A_RXD1, PA13A_TXD1, PD4B_TXD3,
    PD5B_RXD3, PIOA_BASE, PIOD_BASE, USART0_BASE, USART0_IRQ, USART1_BASE, USART1_IRQ,
    USART3_BASE, USART3_IRQ,
};
use lightboard_platform::regs::usart::*;
use lightboard_platform::{
    ClockControl, InterruptControl, Mmio, MuxGroup, PeripheralId, PinControl, Pio, Platform,
    Vector,
};
use lightboard_queue::QUEUE_SIZE;

use crate::channel::{wait_ready, wait_ready_forever, ChannelCore, ChannelState};
use crate::{DispatchTable, InterruptSource, PortDriver, Result, SerialError};

/// Asynchronous 8N1, no parity, peripheral clock
const MODE_8N1: u32 =
    MR_MODE_NORMAL | MR_USCLKS_MCK | MR_CHRL_8_BIT | MR_PAR_NO | MR_NBSTOP_1_BIT | MR_CHMODE_NORMAL;

/// Everything needed to drive one USART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeripheralDescriptor {
    /// Name used in log output
    pub name: &'static str,
    pub rx_pin: u32,
    pub tx_pin: u32,
    /// PIO controller owning both pins
    pub pio_base: usize,
    pub usart_base: usize,
    /// PMC clock gate
    pub peripheral_id: PeripheralId,
    pub vector: Vector,
    pub mux: MuxGroup,
}

impl PeripheralDescriptor {
    pub const fn pins(&self) -> u32 {
        self.rx_pin | self.tx_pin
    }
}

/// USART0 on RX1/TX1 (PA10/PA11)
pub const USART0: PeripheralDescriptor = PeripheralDescriptor {
    name: "usart0",
    rx_pin: PA10A_RXD0,
    tx_pin: PA11A_TXD0,
    pio_base: PIOA_BASE,
    usart_base: USART0_BASE,
    peripheral_id: ID_USART0,
    vector: USART0_IRQ,
    mux: MuxGroup::A,
};

/// USART1 on RX2/TX2 (PA12/PA13)
pub const USART1: PeripheralDescriptor = PeripheralDescriptor {
    name: "usart1",
    rx_pin: PA12A_RXD1,
    tx_pin: PA13A_TXD1,
    pio_base: PIOA_BASE,
    usart_base: USART1_BASE,
    peripheral_id: ID_USART1,
    vector: USART1_IRQ,
    mux: MuxGroup::A,
};

/// USART3 on RX3/TX3 (PD5/PD4)
pub const USART3: PeripheralDescriptor = PeripheralDescriptor {
    name: "usart3",
    rx_pin: PD5B_RXD3,
    tx_pin: PD4B_TXD3,
    pio_base: PIOD_BASE,
    usart_base: USART3_BASE,
    peripheral_id: ID_USART3,
    vector: USART3_IRQ,
    mux: MuxGroup::B,
};

/// USART driver with an `N`-slot receive queue
pub struct UsartChannel<const N: usize = QUEUE_SIZE> {
    info: &'static PeripheralDescriptor,
    platform: Platform,
    table: &'static DispatchTable,
    core: ChannelCore<N>,
}

impl<const N: usize> UsartChannel<N> {
    /// # Safety
    /// The descriptor's `usart_base` and `pio_base`, and `platform`, must
    /// satisfy [`Mmio::new`]. Only one channel may drive a given USART.
    pub const unsafe fn new(
        info: &'static PeripheralDescriptor,
        platform: Platform,
        table: &'static DispatchTable,
    ) -> Self {
        Self {
            info,
            platform,
            table,
            core: ChannelCore::new(),
        }
    }

    pub fn descriptor(&self) -> &'static PeripheralDescriptor {
        self.info
    }

    pub fn state(&self) -> ChannelState {
        self.core.state()
    }

    /// Divisor programmed by `configure`, `None` until running
    pub fn baud_divisor(&self) -> Option<u32> {
        self.core.baud_divisor()
    }

    #[inline]
    fn regs(&self) -> Mmio {
        // Address validity is the constructor's contract
        unsafe { Mmio::new(self.info.usart_base) }
    }

    #[inline]
    fn pio(&self) -> Pio {
        unsafe { Pio::new(self.info.pio_base) }
    }

    #[inline]
    fn status(&self) -> Status {
        Status::from_bits_truncate(self.regs().read(US_CSR))
    }

    #[inline]
    fn tx_ready(&self) -> bool {
        self.status().contains(Status::TXRDY)
    }
}

impl<const N: usize> PortDriver for UsartChannel<N> {
    fn configure(&self, baud_divisor: u32) -> Result<()> {
        let info = self.info;
        self.core.check_configurable(baud_divisor, BRGR_CD_MAX)?;
        if !self.table.is_bound(self) {
            log::warn!("{}: configure before vector {} was registered", info.name, info.vector);
            return Err(SerialError::VectorNotRegistered { vector: info.vector });
        }
        self.core.begin_configure(baud_divisor)?;

        let regs = self.regs();
        let pio = self.pio();
        let pins = info.pins();

        self.platform.pmc.enable_peripheral_clock(info.peripheral_id);

        pio.disable_gpio(pins);
        regs.write(US_CR, (Control::RSTRX | Control::RSTTX).bits());
        pio.select_peripheral(pins, info.mux);
        pio.enable_pull_up(pins);

        regs.write(US_BRGR, baud_divisor);
        regs.write(US_MR, MODE_8N1);

        regs.write(US_IER, Status::RXRDY.bits());
        self.platform.nvic.enable_vector(info.vector);
        regs.write(US_CR, (Control::RXEN | Control::TXEN).bits());

        self.core.finish_configure();
        log::debug!(
            "{}: running (divisor {}, vector {}, mux {:?})",
            info.name,
            baud_divisor,
            info.vector,
            info.mux
        );
        Ok(())
    }

    fn write_byte(&self, byte: u8) -> Result<()> {
        self.core.require_running()?;
        wait_ready_forever(|| self.tx_ready());
        self.regs().write(US_THR, byte as u32);
        Ok(())
    }

    fn write_byte_timeout(&self, byte: u8, spins: u32) -> Result<()> {
        self.core.require_running()?;
        wait_ready(|| self.tx_ready(), spins)?;
        self.regs().write(US_THR, byte as u32);
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

impl<const N: usize> InterruptSource for UsartChannel<N> {
    fn vector(&self) -> Vector {
        self.info.vector
    }

    fn service(&self) {
        // Reading US_CSR acknowledges the interrupt
        let status = self.status();
        if status.contains(Status::RXRDY) {
            // 8-bit characters: RXCHR[8] is never set
            self.push_received(self.regs().read(US_RHR) as u8);
        }
    }
}
