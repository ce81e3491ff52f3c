//! The [`Pipe`] trait and its lazy-iteration contract.
//!
//! A pipe owns at most one cached output element and a monotonic `done`
//! flag. [`Pipe::has_next`] is idempotent: it pulls from upstream exactly
//! enough to populate the cache once, and repeated calls without an
//! intervening [`Pipe::next_end`] never advance consumption. Once `done`
//! is set it never reverts, so an exhausted pipe stays exhausted until its
//! starts are rebound.
//!
//! # Example
//!
//! ```
//! use graphpipes::{IdentityPipe, Pipe};
//!
//! let mut pipe = IdentityPipe::new();
//! pipe.set_starts(Box::new(vec![1, 2, 3].into_iter())).unwrap();
//!
//! assert!(pipe.has_next());
//! assert!(pipe.has_next()); // idempotent: nothing was consumed
//! assert_eq!(pipe.next_end().unwrap(), 1);
//! assert_eq!(pipe.next_end().unwrap(), 2);
//! assert_eq!(pipe.next_end().unwrap(), 3);
//! assert!(!pipe.has_next());
//! assert!(pipe.next_end().is_err());
//! ```

use crate::errors::{PipeError, Result};

/// The upstream input sequence a pipe pulls from.
///
/// Boxed so heterogeneous stages compose, `Send` so the same sequence can
/// be handed to a source thread in a process network.
pub type Starts<S> = Box<dyn Iterator<Item = S> + Send>;

/// A lazily-evaluated, pull-based processing stage over a sequence.
pub trait Pipe {
    /// The element type pulled from upstream.
    type Start;
    /// The element type emitted downstream.
    type End;

    /// Rebind the upstream input, resetting the cache and the `done` flag.
    ///
    /// Pipes whose upstream is shared (fan-out branches) refuse rebinding
    /// with [`PipeError::Unsupported`].
    fn set_starts(&mut self, starts: Starts<Self::Start>) -> Result<()>;

    /// Report whether another element is available.
    ///
    /// Idempotent: at most one element is pulled from upstream to answer,
    /// and it is cached for the next [`next_end`](Pipe::next_end) call.
    fn has_next(&mut self) -> bool;

    /// Remove and return the next element.
    ///
    /// Returns the cached element if one is present, otherwise computes
    /// one; fails with [`PipeError::Exhausted`] when none remains.
    fn next_end(&mut self) -> Result<Self::End>;

    /// Consume the pipe into a standard [`Iterator`] over its ends.
    fn ends(self) -> PipeIter<Self>
    where
        Self: Sized,
    {
        PipeIter::new(self)
    }
}

impl<P: Pipe + ?Sized> Pipe for &mut P {
    type Start = P::Start;
    type End = P::End;

    fn set_starts(&mut self, starts: Starts<P::Start>) -> Result<()> {
        (**self).set_starts(starts)
    }

    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn next_end(&mut self) -> Result<P::End> {
        (**self).next_end()
    }
}

/// Shared state behind the lazy-iteration contract.
///
/// Concrete pipes keep their operator state (predicate, counter,
/// aggregate) beside a `LazyCore` and supply a pull closure that draws
/// from the bound starts. The core enforces the contract in one place:
/// the single-element cache, the monotonic `done` flag, and the
/// exhausted-error path.
pub(crate) struct LazyCore<S, E> {
    starts: Option<Starts<S>>,
    cache: Option<E>,
    done: bool,
}

impl<S, E> LazyCore<S, E> {
    pub(crate) fn new() -> Self {
        Self { starts: None, cache: None, done: false }
    }

    /// Bind new starts and reset consumption state.
    pub(crate) fn rebind(&mut self, starts: Starts<S>) {
        self.starts = Some(starts);
        self.cache = None;
        self.done = false;
    }

    /// Idempotent availability check; `pull` draws at most one element.
    pub(crate) fn has_next<F>(&mut self, mut pull: F) -> bool
    where
        F: FnMut(&mut Starts<S>) -> Option<E>,
    {
        if self.cache.is_some() {
            return true;
        }
        if self.done {
            return false;
        }
        let Some(starts) = self.starts.as_mut() else {
            // Never bound: an empty sequence.
            self.done = true;
            return false;
        };
        match pull(starts) {
            Some(value) => {
                self.cache = Some(value);
                true
            }
            None => {
                self.done = true;
                false
            }
        }
    }

    /// Return the cached element or compute one; error when exhausted.
    pub(crate) fn next_end<F>(&mut self, mut pull: F) -> Result<E>
    where
        F: FnMut(&mut Starts<S>) -> Option<E>,
    {
        if let Some(value) = self.cache.take() {
            return Ok(value);
        }
        if self.done {
            return Err(PipeError::Exhausted);
        }
        let Some(starts) = self.starts.as_mut() else {
            self.done = true;
            return Err(PipeError::Exhausted);
        };
        match pull(starts) {
            Some(value) => Ok(value),
            None => {
                self.done = true;
                Err(PipeError::Exhausted)
            }
        }
    }
}

/// A pipe that forwards every upstream element unchanged.
///
/// Useful as a chain terminator and as the simplest reference
/// implementation of the lazy-iteration contract.
pub struct IdentityPipe<T> {
    core: LazyCore<T, T>,
}

impl<T> IdentityPipe<T> {
    /// Create an identity pipe with no starts bound.
    #[must_use]
    pub fn new() -> Self {
        Self { core: LazyCore::new() }
    }
}

impl<T> Default for IdentityPipe<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pipe for IdentityPipe<T> {
    type Start = T;
    type End = T;

    fn set_starts(&mut self, starts: Starts<T>) -> Result<()> {
        self.core.rebind(starts);
        Ok(())
    }

    fn has_next(&mut self) -> bool {
        self.core.has_next(|starts| starts.next())
    }

    fn next_end(&mut self) -> Result<T> {
        self.core.next_end(|starts| starts.next())
    }
}

/// Iterator adapter over a pipe's ends.
///
/// Drives the pipe through `has_next`/`next_end`, so the pipe's own
/// contract (cache handling, side-effect bookkeeping) stays in charge.
pub struct PipeIter<P> {
    pipe: P,
}

impl<P: Pipe> PipeIter<P> {
    /// Wrap a pipe whose starts are already bound.
    #[must_use]
    pub fn new(pipe: P) -> Self {
        Self { pipe }
    }

    /// Unwrap the pipe, e.g. to read a side effect after draining.
    pub fn into_inner(self) -> P {
        self.pipe
    }
}

impl<P: Pipe> Iterator for PipeIter<P> {
    type Item = P::End;

    fn next(&mut self) -> Option<P::End> {
        if self.pipe.has_next() { self.pipe.next_end().ok() } else { None }
    }
}
