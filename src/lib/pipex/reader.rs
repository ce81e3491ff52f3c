//! Terminal sink that drains a channel and reports a count.
//!
//! A [`ChannelReader`] runs on its own thread, reading its channel until
//! the termination signal and counting what it saw. Completion is
//! delivered through a one-shot latch (a capacity-one channel the worker
//! fires exactly once): the first [`result`](ChannelReader::result) call
//! blocks on the latch, later calls return the memoized count
//! immediately.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, bounded};

use crate::pipex::channel::Channel;

/// Counting sink over one channel.
pub struct ChannelReader {
    /// One-shot completion latch (`Option` so it can be consumed on first use).
    latch: Option<Receiver<u64>>,
    /// Handle to the reader thread.
    handle: Option<JoinHandle<()>>,
    /// Memoized final count after the latch has fired.
    result: Option<u64>,
}

impl ChannelReader {
    /// Start draining `input` on a new thread.
    #[must_use]
    pub fn spawn<T: Send + 'static>(input: Arc<Channel<T>>) -> Self {
        let (latch_tx, latch_rx) = bounded(1);
        let handle = thread::spawn(move || {
            let mut count: u64 = 0;
            while input.read().is_some() {
                count += 1;
            }
            // Fires exactly once; the receiver may already be gone if the
            // reader was dropped without asking for its result.
            let _ = latch_tx.send(count);
        });
        Self { latch: Some(latch_rx), handle: Some(handle), result: None }
    }

    /// Block until the channel is drained, then return the item count.
    ///
    /// The first call waits on the completion latch; every later call
    /// returns the same count immediately.
    pub fn result(&mut self) -> u64 {
        if let Some(count) = self.result {
            return count;
        }
        let count = match self.latch.take() {
            Some(latch) => latch.recv().unwrap_or_else(|_| {
                log::error!("channel reader thread terminated without reporting a count");
                0
            }),
            None => 0,
        };
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        self.result = Some(count);
        count
    }
}
