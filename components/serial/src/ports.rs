//! The Due's four serial channels and their interrupt entry points
//!
//! | Channel | Peripheral | Pins     | Vector |
//! |---------|------------|----------|--------|
//! | `PORT0` | UART       | PA8/PA9  | 8      |
//! | `PORT1` | USART0     | PA10/PA11| 17     |
//! | `PORT2` | USART1     | PA12/PA13| 18     |
//! | `PORT3` | USART3     | PD5/PD4  | 20     |
//!
//! ```ignore
//! lightboard_serial::ports::init()?;
//! PORT0.configure(config::DEFAULT_BAUD_DIVISOR)?;
//! PORT0.write_str("ready\r\n")?;
//! ```

use lightboard_platform::Platform;

use crate::{DispatchTable, Result, UartChannel, UsartChannel, USART0, USART1, USART3};

/// Vector table consulted by the interrupt entry points below
pub static DISPATCH: DispatchTable = DispatchTable::new();

pub static PORT0: UartChannel = unsafe { UartChannel::new(Platform::SAM3X8E, &DISPATCH) };
pub static PORT1: UsartChannel = unsafe { UsartChannel::new(&USART0, Platform::SAM3X8E, &DISPATCH) };
pub static PORT2: UsartChannel = unsafe { UsartChannel::new(&USART1, Platform::SAM3X8E, &DISPATCH) };
pub static PORT3: UsartChannel = unsafe { UsartChannel::new(&USART3, Platform::SAM3X8E, &DISPATCH) };

/// Register every board channel with [`DISPATCH`]
///
/// Call once before configuring any port. Touches no hardware.
///
/// # Errors
/// `VectorAlreadyRegistered` if called a second time.
pub fn init() -> Result<()> {
    DISPATCH.register(&PORT0)?;
    DISPATCH.register(&PORT1)?;
    DISPATCH.register(&PORT2)?;
    DISPATCH.register(&PORT3)?;
    log::info!("serial: 4 channels registered");
    Ok(())
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod vectors {
    use lightboard_platform::board::{UART_IRQ, USART0_IRQ, USART1_IRQ, USART3_IRQ};

    use super::DISPATCH;

    #[no_mangle]
    pub extern "C" fn UART_Handler() {
        DISPATCH.dispatch(UART_IRQ);
    }

    #[no_mangle]
    pub extern "C" fn USART0_Handler() {
        DISPATCH.dispatch(USART0_IRQ);
    }

    #[no_mangle]
    pub extern "C" fn USART1_Handler() {
        DISPATCH.dispatch(USART1_IRQ);
    }

    #[no_mangle]
    pub extern "C" fn USART3_Handler() {
        DISPATCH.dispatch(USART3_IRQ);
    }
}
