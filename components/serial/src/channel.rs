//! State shared by every channel type: lifecycle, divisor and receive queue

use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

use lightboard_queue::SharedQueue;

use crate::{Result, SerialError};

/// Channel lifecycle
///
/// `configure()` is the only way forward and there is no way back.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Constructed, hardware untouched
    Uninitialized = 0,
    /// `configure()` is programming the peripheral
    Configured = 1,
    /// Receiver and transmitter enabled
    Running = 2,
}

impl ChannelState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => ChannelState::Uninitialized,
            1 => ChannelState::Configured,
            _ => ChannelState::Running,
        }
    }
}

pub(crate) struct ChannelCore<const N: usize> {
    state: AtomicU8,
    divisor: AtomicU32,
    rx: SharedQueue<N>,
}

impl<const N: usize> ChannelCore<N> {
    pub(crate) const fn new() -> Self {
        Self {
            state: AtomicU8::new(ChannelState::Uninitialized as u8),
            divisor: AtomicU32::new(0),
            rx: SharedQueue::new(),
        }
    }

    pub(crate) fn state(&self) -> ChannelState {
        ChannelState::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Divisor programmed by `configure`, once running
    pub(crate) fn baud_divisor(&self) -> Option<u32> {
        match self.state() {
            ChannelState::Running => Some(self.divisor.load(Ordering::Relaxed)),
            _ => None,
        }
    }

    /// Reject a second configure and divisors the `CD` field cannot hold
    pub(crate) fn check_configurable(&self, divisor: u32, max: u32) -> Result<()> {
        if self.state() != ChannelState::Uninitialized {
            return Err(SerialError::AlreadyConfigured);
        }
        if divisor == 0 || divisor > max {
            return Err(SerialError::InvalidBaudDivisor { divisor, max });
        }
        Ok(())
    }

    /// Claim the Uninitialized -> Configured transition
    pub(crate) fn begin_configure(&self, divisor: u32) -> Result<()> {
        self.state
            .compare_exchange(
                ChannelState::Uninitialized as u8,
                ChannelState::Configured as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map_err(|_| SerialError::AlreadyConfigured)?;
        self.divisor.store(divisor, Ordering::Relaxed);
        Ok(())
    }

    pub(crate) fn finish_configure(&self) {
        self.state.store(ChannelState::Running as u8, Ordering::Release);
    }

    pub(crate) fn require_running(&self) -> Result<()> {
        match self.state() {
            ChannelState::Running => Ok(()),
            _ => Err(SerialError::NotConfigured),
        }
    }

    /// Interrupt side
    ///
    /// Accepted in any state: the receive interrupt is armed while
    /// `configure` is still finishing.
    #[inline]
    pub(crate) fn push(&self, byte: u8) {
        self.rx.enqueue(byte);
    }

    pub(crate) fn read(&self) -> Result<u8> {
        self.require_running()?;
        Ok(self.rx.dequeue()?)
    }

    pub(crate) fn pending(&self) -> Result<usize> {
        self.require_running()?;
        Ok(self.rx.pending_count())
    }
}

/// Poll `ready` until it reports true, at most `spins` times
pub(crate) fn wait_ready(ready: impl Fn() -> bool, spins: u32) -> Result<()> {
    for _ in 0..spins {
        if ready() {
            return Ok(());
        }
        core::hint::spin_loop();
    }
    Err(SerialError::TransmitTimeout { spins })
}

/// Poll `ready` with no upper bound
#[inline]
pub(crate) fn wait_ready_forever(ready: impl Fn() -> bool) {
    while !ready() {
        core::hint::spin_loop();
    }
}
