//! Predicate and sampling filter pipes.
//!
//! A filter forwards upstream elements that satisfy its predicate and
//! skips the rest exactly, preserving upstream order. The inverted mode
//! forwards the rejects instead. [`RandomFilterPipe`] applies a fixed
//! per-element pass probability.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::Result;
use crate::pipes::pipe::{LazyCore, Pipe, Starts};

/// Forwards elements for which the predicate holds (or, inverted, fails).
///
/// # Example
///
/// ```
/// use graphpipes::{FilterPipe, Pipe};
///
/// let mut evens = FilterPipe::new(|n: &i32| n % 2 == 0);
/// evens.set_starts(Box::new((1..=6).collect::<Vec<_>>().into_iter())).unwrap();
/// assert_eq!(evens.ends().collect::<Vec<_>>(), vec![2, 4, 6]);
/// ```
pub struct FilterPipe<S, F> {
    core: LazyCore<S, S>,
    predicate: F,
    invert: bool,
}

impl<S, F> FilterPipe<S, F>
where
    F: FnMut(&S) -> bool,
{
    /// Forward elements satisfying `predicate`.
    #[must_use]
    pub fn new(predicate: F) -> Self {
        Self { core: LazyCore::new(), predicate, invert: false }
    }

    /// Forward elements *not* satisfying `predicate`.
    #[must_use]
    pub fn inverted(predicate: F) -> Self {
        Self { core: LazyCore::new(), predicate, invert: true }
    }
}

impl<S, F> Pipe for FilterPipe<S, F>
where
    F: FnMut(&S) -> bool,
{
    type Start = S;
    type End = S;

    fn set_starts(&mut self, starts: Starts<S>) -> Result<()> {
        self.core.rebind(starts);
        Ok(())
    }

    fn has_next(&mut self) -> bool {
        let predicate = &mut self.predicate;
        let invert = self.invert;
        self.core.has_next(|starts| starts.find(|item| predicate(item) != invert))
    }

    fn next_end(&mut self) -> Result<S> {
        let predicate = &mut self.predicate;
        let invert = self.invert;
        self.core.next_end(|starts| starts.find(|item| predicate(item) != invert))
    }
}

/// Forwards each element with a fixed probability.
///
/// A pass probability of 1.0 forwards everything, 0.0 forwards nothing;
/// for intermediate values the fraction forwarded converges to the
/// probability over a large sample.
pub struct RandomFilterPipe<S> {
    core: LazyCore<S, S>,
    pass_probability: f64,
    rng: StdRng,
}

impl<S> RandomFilterPipe<S> {
    /// Create a sampling filter with the given pass probability.
    ///
    /// # Panics
    ///
    /// Panics if `pass_probability` is outside `[0.0, 1.0]`.
    #[must_use]
    pub fn new(pass_probability: f64) -> Self {
        Self::with_rng(pass_probability, StdRng::from_os_rng())
    }

    /// Create a sampling filter with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn with_seed(pass_probability: f64, seed: u64) -> Self {
        Self::with_rng(pass_probability, StdRng::seed_from_u64(seed))
    }

    fn with_rng(pass_probability: f64, rng: StdRng) -> Self {
        assert!(
            (0.0..=1.0).contains(&pass_probability),
            "pass probability must be within [0.0, 1.0], got {pass_probability}"
        );
        Self { core: LazyCore::new(), pass_probability, rng }
    }
}

impl<S> Pipe for RandomFilterPipe<S> {
    type Start = S;
    type End = S;

    fn set_starts(&mut self, starts: Starts<S>) -> Result<()> {
        self.core.rebind(starts);
        Ok(())
    }

    fn has_next(&mut self) -> bool {
        let probability = self.pass_probability;
        let rng = &mut self.rng;
        self.core.has_next(|starts| starts.find(|_| rng.random_bool(probability)))
    }

    fn next_end(&mut self) -> Result<S> {
        let probability = self.pass_probability;
        let rng = &mut self.rng;
        self.core.next_end(|starts| starts.find(|_| rng.random_bool(probability)))
    }
}
