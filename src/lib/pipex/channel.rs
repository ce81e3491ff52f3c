//! Bounded, closable FIFO channel connecting two concurrent stages.
//!
//! The channel is the only shared mutable state in a process network: a
//! fixed-capacity queue plus a one-way `closed` flag, guarded by a mutex
//! with two condition variables for the full and empty cases.
//!
//! - [`Channel::write`] blocks while the channel is full and fails once
//!   it is closed
//! - [`Channel::read`] blocks while the channel is empty and open, and
//!   returns `None` only after the channel is both closed and drained —
//!   buffered items are never discarded by a close
//! - [`Channel::close`] is idempotent and wakes everyone blocked
//!
//! # Example
//!
//! ```
//! use graphpipes::Channel;
//!
//! let channel = Channel::new(4);
//! channel.write("a").unwrap();
//! channel.write("b").unwrap();
//! channel.close();
//!
//! assert_eq!(channel.read(), Some("a"));
//! assert_eq!(channel.read(), Some("b"));
//! assert_eq!(channel.read(), None); // closed and drained
//! assert!(channel.write("c").is_err());
//! ```

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

use crate::errors::{PipeError, Result};

struct ChannelState<T> {
    queue: VecDeque<T>,
    closed: bool,
}

/// A bounded FIFO buffer with blocking writes and reads.
///
/// Capacity is fixed at construction and never exceeded. State only moves
/// one way: OPEN to CLOSED.
pub struct Channel<T> {
    state: Mutex<ChannelState<T>>,
    readable: Condvar,
    writable: Condvar,
    capacity: usize,
}

impl<T> Channel<T> {
    /// Create a channel with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a zero-capacity channel could never
    /// accept a write.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "channel capacity must be at least 1");
        Self {
            state: Mutex::new(ChannelState { queue: VecDeque::with_capacity(capacity), closed: false }),
            readable: Condvar::new(),
            writable: Condvar::new(),
            capacity,
        }
    }

    /// Append an item, blocking while the channel is full.
    ///
    /// Fails with [`PipeError::Closed`] if the channel is closed, whether
    /// it was closed before the call or while the call was blocked.
    pub fn write(&self, item: T) -> Result<()> {
        let mut state = self.state.lock();
        loop {
            if state.closed {
                return Err(PipeError::Closed);
            }
            if state.queue.len() < self.capacity {
                state.queue.push_back(item);
                self.readable.notify_one();
                return Ok(());
            }
            self.writable.wait(&mut state);
        }
    }

    /// Remove the oldest item, blocking while the channel is empty and
    /// open.
    ///
    /// Returns `None` — the termination signal — once the channel is
    /// closed and every buffered item has been drained. Never blocks
    /// forever on a closed channel.
    #[must_use]
    pub fn read(&self) -> Option<T> {
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.queue.pop_front() {
                self.writable.notify_one();
                return Some(item);
            }
            if state.closed {
                return None;
            }
            self.readable.wait(&mut state);
        }
    }

    /// Close the channel.
    ///
    /// Idempotent and one-way. Blocked writers fail with
    /// [`PipeError::Closed`]; blocked readers drain whatever is buffered
    /// and then observe termination.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if !state.closed {
            state.closed = true;
            self.readable.notify_all();
            self.writable.notify_all();
        }
    }

    /// Whether the channel has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of items currently buffered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Whether the buffer is currently empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().queue.is_empty()
    }

    /// The fixed capacity chosen at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
