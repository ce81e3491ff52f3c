//! Pipes that accumulate an auxiliary result while forwarding output.
//!
//! A side-effect pipe behaves like any other pipe on its main output
//! stream and additionally owns an accumulator, mutated only by the pipe
//! itself in lockstep with its own emissions. [`CountPipe`] counts what
//! the consumer has observed; [`AggregatorPipe`] materializes the whole
//! upstream on first pull and then re-iterates it.

use crate::errors::{PipeError, Result};
use crate::pipes::pipe::{LazyCore, Pipe, Starts};

/// A pipe that exposes an accumulated result alongside its output stream.
///
/// The accumulator is readable at any time; unless documented otherwise
/// (see [`AggregatorPipe`]) it is consistent with the elements already
/// emitted, never ahead of them.
pub trait SideEffectPipe: Pipe {
    /// The accumulator type.
    type SideEffect;

    /// Read the accumulator.
    fn side_effect(&self) -> &Self::SideEffect;
}

/// Forwards every element unchanged, counting emissions.
///
/// The count increments when an element is handed to the consumer by
/// [`Pipe::next_end`], never when [`Pipe::has_next`] merely caches one.
/// The accumulator therefore always equals the number of elements the
/// consumer has observed so far.
///
/// # Example
///
/// ```
/// use graphpipes::{CountPipe, Pipe, SideEffectPipe};
///
/// let mut count = CountPipe::new();
/// count.set_starts(Box::new(vec!['a', 'b', 'c'].into_iter())).unwrap();
///
/// assert!(count.has_next());
/// assert_eq!(*count.side_effect(), 0); // cached, not yet observed
/// count.next_end().unwrap();
/// assert_eq!(*count.side_effect(), 1);
/// ```
pub struct CountPipe<T> {
    core: LazyCore<T, T>,
    count: u64,
}

impl<T> CountPipe<T> {
    /// Create a counting pass-through with no starts bound.
    #[must_use]
    pub fn new() -> Self {
        Self { core: LazyCore::new(), count: 0 }
    }
}

impl<T> Default for CountPipe<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pipe for CountPipe<T> {
    type Start = T;
    type End = T;

    fn set_starts(&mut self, starts: Starts<T>) -> Result<()> {
        self.core.rebind(starts);
        self.count = 0;
        Ok(())
    }

    fn has_next(&mut self) -> bool {
        self.core.has_next(|starts| starts.next())
    }

    fn next_end(&mut self) -> Result<T> {
        let value = self.core.next_end(|starts| starts.next())?;
        self.count += 1;
        Ok(value)
    }
}

impl<T> SideEffectPipe for CountPipe<T> {
    type SideEffect = u64;

    fn side_effect(&self) -> &u64 {
        &self.count
    }
}

/// Materializes the whole upstream on first pull, then re-iterates it.
///
/// This is the deliberate eager-drain exception to laziness: grouping and
/// sorting aggregations need the full sequence before any element can be
/// emitted. The accumulator holds the materialized collection and is only
/// complete once the first `has_next`/`next_end` call has drained
/// upstream.
pub struct AggregatorPipe<T> {
    starts: Option<Starts<T>>,
    aggregate: Vec<T>,
    cursor: usize,
    drained: bool,
}

impl<T: Clone> AggregatorPipe<T> {
    /// Create an aggregator with no starts bound.
    #[must_use]
    pub fn new() -> Self {
        Self { starts: None, aggregate: Vec::new(), cursor: 0, drained: false }
    }

    fn ensure_drained(&mut self) {
        if self.drained {
            return;
        }
        self.drained = true;
        if let Some(starts) = self.starts.as_mut() {
            for item in starts {
                self.aggregate.push(item);
            }
        }
        self.starts = None;
    }
}

impl<T: Clone> Default for AggregatorPipe<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Pipe for AggregatorPipe<T> {
    type Start = T;
    type End = T;

    fn set_starts(&mut self, starts: Starts<T>) -> Result<()> {
        self.starts = Some(starts);
        self.aggregate.clear();
        self.cursor = 0;
        self.drained = false;
        Ok(())
    }

    fn has_next(&mut self) -> bool {
        self.ensure_drained();
        self.cursor < self.aggregate.len()
    }

    fn next_end(&mut self) -> Result<T> {
        self.ensure_drained();
        match self.aggregate.get(self.cursor) {
            Some(value) => {
                let value = value.clone();
                self.cursor += 1;
                Ok(value)
            }
            None => Err(PipeError::Exhausted),
        }
    }
}

impl<T: Clone> SideEffectPipe for AggregatorPipe<T> {
    type SideEffect = Vec<T>;

    fn side_effect(&self) -> &Vec<T> {
        &self.aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts(items: Vec<i32>) -> Starts<i32> {
        Box::new(items.into_iter())
    }

    #[test]
    fn test_count_matches_input_length() {
        for n in [0usize, 1, 5, 100] {
            let mut pipe = CountPipe::new();
            pipe.set_starts(starts((0..n as i32).collect())).unwrap();
            let drained: Vec<i32> = (&mut pipe).ends().collect();
            assert_eq!(drained.len(), n);
            assert_eq!(*pipe.side_effect(), n as u64);
        }
    }

    #[test]
    fn test_count_never_ahead_of_emission() {
        let mut pipe = CountPipe::new();
        pipe.set_starts(starts(vec![1, 2, 3])).unwrap();

        assert!(pipe.has_next());
        assert!(pipe.has_next());
        assert_eq!(*pipe.side_effect(), 0);

        pipe.next_end().unwrap();
        assert_eq!(*pipe.side_effect(), 1);
        pipe.next_end().unwrap();
        pipe.next_end().unwrap();
        assert_eq!(*pipe.side_effect(), 3);
        assert!(!pipe.has_next());
        assert_eq!(*pipe.side_effect(), 3);
    }

    #[test]
    fn test_count_resets_on_rebind() {
        let mut pipe = CountPipe::new();
        pipe.set_starts(starts(vec![1, 2])).unwrap();
        let _: Vec<i32> = (&mut pipe).ends().collect();
        assert_eq!(*pipe.side_effect(), 2);

        pipe.set_starts(starts(vec![9])).unwrap();
        assert_eq!(*pipe.side_effect(), 0);
        let _: Vec<i32> = (&mut pipe).ends().collect();
        assert_eq!(*pipe.side_effect(), 1);
    }

    #[test]
    fn test_aggregator_forwards_everything_in_order() {
        let mut pipe = AggregatorPipe::new();
        pipe.set_starts(starts(vec![3, 1, 2, 1])).unwrap();
        assert_eq!((&mut pipe).ends().collect::<Vec<_>>(), vec![3, 1, 2, 1]);
    }

    #[test]
    fn test_aggregator_accumulator_is_complete_after_first_pull() {
        let mut pipe = AggregatorPipe::new();
        pipe.set_starts(starts(vec![5, 5, 6])).unwrap();
        assert!(pipe.side_effect().is_empty()); // nothing pulled yet

        assert!(pipe.has_next());
        // One pull drained everything, duplicates included.
        assert_eq!(*pipe.side_effect(), vec![5, 5, 6]);

        let emitted: Vec<i32> = (&mut pipe).ends().collect();
        assert_eq!(emitted, vec![5, 5, 6]);
        assert_eq!(*pipe.side_effect(), vec![5, 5, 6]);
    }

    #[test]
    fn test_aggregator_exhaustion_and_rebind() {
        let mut pipe = AggregatorPipe::new();
        pipe.set_starts(starts(vec![1])).unwrap();
        assert_eq!(pipe.next_end().unwrap(), 1);
        assert_eq!(pipe.next_end(), Err(PipeError::Exhausted));

        pipe.set_starts(starts(vec![2, 3])).unwrap();
        assert_eq!((&mut pipe).ends().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(*pipe.side_effect(), vec![2, 3]);
    }

    #[test]
    fn test_aggregator_empty_input() {
        let mut pipe: AggregatorPipe<i32> = AggregatorPipe::new();
        pipe.set_starts(starts(vec![])).unwrap();
        assert!(!pipe.has_next());
        assert!(pipe.side_effect().is_empty());
    }
}
