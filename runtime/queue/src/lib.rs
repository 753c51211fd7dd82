//! Byte Queues - Receive buffering for interrupt-driven serial channels
//!
//! # Purpose
//! Provides the fixed-capacity circular byte buffer every serial channel owns.
//! The interrupt handler pushes received bytes, foreground code drains them.
//!
//! # Integration Points
//! - Depends on: `critical-section` (interrupt masking on target, global lock on host)
//! - Provides to: `lightboard-serial` channels
//!
//! # Architecture
//! [`RingBuffer`] is the plain data structure with no synchronization.
//! [`SharedQueue`] wraps it in a critical-section mutex so both execution
//! contexts can reach it through `&self`.
//!
//! # Overwrite Policy
//! Enqueue never fails and never blocks. A full queue silently drops its
//! oldest unread byte. Dequeue on an empty queue reports [`QueueError::Empty`].

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

mod ring;
mod shared;

pub use ring::RingBuffer;
pub use shared::SharedQueue;

use thiserror::Error;

/// Backing storage size of a channel queue (one slot stays unused)
pub const QUEUE_SIZE: usize = 255;

static_assertions::const_assert!(QUEUE_SIZE >= 2);

/// Error types for queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("Queue is empty")]
    Empty,
}

pub type Result<T> = core::result::Result<T, QueueError>;
