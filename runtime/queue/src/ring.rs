//! Overwrite-on-full ring buffer for received bytes

use crate::{QueueError, Result, QUEUE_SIZE};

/// Circular byte buffer with `N` slots holding at most `N - 1` bytes
///
/// `head` is the next slot to dequeue, `tail` the last slot written.
/// When the buffer is full, enqueue overwrites the oldest unread byte and
/// `count` stays pinned at `N - 1`.
pub struct RingBuffer<const N: usize = QUEUE_SIZE> {
    buffer: [u8; N],
    head: usize,
    tail: usize,
    count: usize,
}

impl<const N: usize> RingBuffer<N> {
    /// Create a new empty ring buffer
    ///
    /// # Panics
    /// Panics if N is smaller than 2 (compile-time when used in a `static`)
    pub const fn new() -> Self {
        assert!(N >= 2, "Ring buffer needs at least 2 slots");

        Self {
            buffer: [0; N],
            head: 0,
            tail: N - 1,
            count: 0,
        }
    }

    /// Maximum number of bytes the buffer holds at once
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Number of unread bytes
    pub fn pending_count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == N - 1
    }

    /// Append a byte, discarding the oldest unread byte if full
    pub fn enqueue(&mut self, byte: u8) {
        self.tail = Self::advance(self.tail);
        self.buffer[self.tail] = byte;

        if self.count < N - 1 {
            self.count += 1;
        } else {
            // Overwrite: drop the oldest unread byte
            self.head = Self::advance(self.head);
        }
    }

    /// Take the oldest unread byte
    ///
    /// # Errors
    /// Returns `QueueError::Empty` without touching the indices when no
    /// byte is pending
    pub fn dequeue(&mut self) -> Result<u8> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }

        let byte = self.buffer[self.head];
        self.head = Self::advance(self.head);
        self.count -= 1;
        Ok(byte)
    }

    /// Look at the oldest unread byte without consuming it
    pub fn peek(&self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some(self.buffer[self.head])
        }
    }

    /// Drop every pending byte
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = N - 1;
        self.count = 0;
    }

    /// Current `(head, tail)` slot indices
    pub fn positions(&self) -> (usize, usize) {
        (self.head, self.tail)
    }

    #[inline]
    const fn advance(index: usize) -> usize {
        let next = index + 1;
        if next == N { 0 } else { next }
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
