//! Interrupt-safe wrapper around [`RingBuffer`]
//!
//! The interrupt handler enqueues and may move `head` when it overwrites,
//! while the foreground dequeues. Every operation therefore runs as one
//! critical section so neither side observes a half-finished update.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::{RingBuffer, Result, QUEUE_SIZE};

/// Ring buffer shared between interrupt and foreground context
pub struct SharedQueue<const N: usize = QUEUE_SIZE> {
    ring: Mutex<RefCell<RingBuffer<N>>>,
}

impl<const N: usize> SharedQueue<N> {
    pub const fn new() -> Self {
        Self {
            ring: Mutex::new(RefCell::new(RingBuffer::new())),
        }
    }

    /// Producer side, safe to call from an interrupt handler
    #[inline]
    pub fn enqueue(&self, byte: u8) {
        self.with(|ring| ring.enqueue(byte));
    }

    /// Consumer side, foreground only
    pub fn dequeue(&self) -> Result<u8> {
        self.with(|ring| ring.dequeue())
    }

    pub fn pending_count(&self) -> usize {
        self.with(|ring| ring.pending_count())
    }

    pub fn peek(&self) -> Option<u8> {
        self.with(|ring| ring.peek())
    }

    pub fn clear(&self) {
        self.with(|ring| ring.clear());
    }

    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Run `f` on the ring with interrupts masked
    ///
    /// # Panics
    /// Panics if `f` calls back into this queue: the ring is already
    /// borrowed for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&mut RingBuffer<N>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.ring.borrow_ref_mut(cs)))
    }
}

impl<const N: usize> Default for SharedQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
