//! Fan-out of one upstream sequence to independent branches.
//!
//! A [`CopySplitPipe`] lets N downstream pipelines consume the same
//! upstream without it being iterated N times. Each branch owns a FIFO
//! queue; when a branch runs dry, one upstream pull distributes the
//! element to every branch queue, so each element reaches each branch
//! exactly once and in upstream order.
//!
//! Branch queues live behind a mutex: the canonical use is
//! single-threaded, but nothing breaks if branches are drained from
//! different threads.
//!
//! # Example
//!
//! ```
//! use graphpipes::{CopySplitPipe, Pipe};
//!
//! let split = CopySplitPipe::new(Box::new(vec![1, 2, 3].into_iter()));
//! let left = split.branch();
//! let right = split.branch();
//!
//! assert_eq!(left.ends().collect::<Vec<_>>(), vec![1, 2, 3]);
//! assert_eq!(right.ends().collect::<Vec<_>>(), vec![1, 2, 3]);
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::errors::{PipeError, Result};
use crate::pipes::pipe::{Pipe, Starts};

struct SplitShared<S> {
    starts: Starts<S>,
    queues: Vec<VecDeque<S>>,
    done: bool,
}

impl<S: Clone> SplitShared<S> {
    /// Ensure branch `index` has an element queued, pulling upstream at
    /// most once. A pull feeds every branch queue.
    fn refill(&mut self, index: usize) -> bool {
        if !self.queues[index].is_empty() {
            return true;
        }
        if self.done {
            return false;
        }
        match self.starts.next() {
            Some(item) => {
                for queue in &mut self.queues {
                    queue.push_back(item.clone());
                }
                true
            }
            None => {
                self.done = true;
                false
            }
        }
    }
}

/// Broadcasts one upstream sequence to any number of branches.
///
/// Branches must be created before consumption begins: a branch created
/// after elements have been distributed misses those elements.
pub struct CopySplitPipe<S> {
    shared: Arc<Mutex<SplitShared<S>>>,
}

impl<S: Clone> CopySplitPipe<S> {
    /// Create a fan-out stage over the given upstream.
    #[must_use]
    pub fn new(starts: Starts<S>) -> Self {
        Self { shared: Arc::new(Mutex::new(SplitShared { starts, queues: Vec::new(), done: false })) }
    }

    /// Open a new branch over the upstream.
    #[must_use]
    pub fn branch(&self) -> SplitBranch<S> {
        let mut shared = self.shared.lock();
        shared.queues.push(VecDeque::new());
        SplitBranch { shared: Arc::clone(&self.shared), index: shared.queues.len() - 1 }
    }

    /// Number of branches opened so far.
    #[must_use]
    pub fn branch_count(&self) -> usize {
        self.shared.lock().queues.len()
    }
}

/// One consumer's view of a fan-out stage.
///
/// A branch is a pipe whose upstream is the shared split state; rebinding
/// its starts is refused because the upstream belongs to all branches.
pub struct SplitBranch<S> {
    shared: Arc<Mutex<SplitShared<S>>>,
    index: usize,
}

impl<S: Clone> Pipe for SplitBranch<S> {
    type Start = S;
    type End = S;

    fn set_starts(&mut self, _starts: Starts<S>) -> Result<()> {
        Err(PipeError::Unsupported { operation: "set_starts" })
    }

    fn has_next(&mut self) -> bool {
        self.shared.lock().refill(self.index)
    }

    fn next_end(&mut self) -> Result<S> {
        let mut shared = self.shared.lock();
        if shared.refill(self.index) {
            shared.queues[self.index].pop_front().ok_or(PipeError::Exhausted)
        } else {
            Err(PipeError::Exhausted)
        }
    }
}
