//! Sequential composition of pipes.
//!
//! A [`Pipeline`] threads a sequence through any number of pipes, binding
//! each pipe's starts to the previous stage's ends. The result is itself
//! a standard iterator, so pipelines nest and feed process-network
//! sources directly.
//!
//! # Example
//!
//! ```
//! use graphpipes::{FilterPipe, IdentityPipe, Pipeline};
//!
//! let out: Vec<i32> = Pipeline::from_starts(1..=10)
//!     .then(FilterPipe::new(|n: &i32| n % 2 == 0))
//!     .unwrap()
//!     .then(IdentityPipe::new())
//!     .unwrap()
//!     .collect();
//! assert_eq!(out, vec![2, 4, 6, 8, 10]);
//! ```

use crate::errors::Result;
use crate::pipes::pipe::{Pipe, Starts};

/// A chain of pipes bound end to start, drained as one iterator.
pub struct Pipeline<E> {
    ends: Starts<E>,
}

impl<E: 'static> Pipeline<E> {
    /// Start a pipeline from a raw sequence.
    #[must_use]
    pub fn from_starts(starts: impl Iterator<Item = E> + Send + 'static) -> Self {
        Self { ends: Box::new(starts) }
    }

    /// Append a pipe, binding the pipeline's current ends as its starts.
    ///
    /// Fails if the pipe refuses rebinding (e.g. a fan-out branch).
    pub fn then<P>(self, mut pipe: P) -> Result<Pipeline<P::End>>
    where
        P: Pipe<Start = E> + Send + 'static,
    {
        pipe.set_starts(self.ends)?;
        Ok(Pipeline { ends: Box::new(pipe.ends()) })
    }
}

impl<E> Iterator for Pipeline<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        self.ends.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PipeError;
    use crate::pipes::filter::FilterPipe;
    use crate::pipes::sideeffect::CountPipe;
    use crate::pipes::split::CopySplitPipe;

    #[test]
    fn test_multi_stage_pipeline() {
        let out: Vec<i32> = Pipeline::from_starts(1..=20)
            .then(FilterPipe::new(|n: &i32| n % 2 == 0))
            .unwrap()
            .then(FilterPipe::inverted(|n: &i32| *n > 10))
            .unwrap()
            .collect();
        assert_eq!(out, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_pipeline_is_lazy() {
        // A side-effecting stage observes nothing until the pipeline is
        // actually drained.
        let mut pipeline = Pipeline::from_starts(0..100).then(CountPipe::new()).unwrap();
        assert_eq!(pipeline.next(), Some(0));
        assert_eq!(pipeline.next(), Some(1));
        assert_eq!(pipeline.take(3).count(), 3);
    }

    #[test]
    fn test_pipeline_refuses_shared_upstream_stage() {
        let split = CopySplitPipe::new(Box::new(vec![1, 2].into_iter()));
        let branch = split.branch();
        let result = Pipeline::from_starts(vec![3].into_iter()).then(branch);
        assert!(matches!(result, Err(PipeError::Unsupported { .. })));
    }

    #[test]
    fn test_empty_pipeline() {
        let out: Vec<i32> =
            Pipeline::from_starts(std::iter::empty()).then(CountPipe::new()).unwrap().collect();
        assert!(out.is_empty());
    }
}
