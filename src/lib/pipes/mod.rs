//! Lazy, pull-based pipeline framework.
//!
//! A pipe is a single-threaded processing stage over a sequence. Nothing
//! happens until a consumer pulls: calling [`Pipe::has_next`] draws exactly
//! enough from upstream to cache one output element (or learn that none
//! remain), and [`Pipe::next_end`] hands the cached element out. Chaining
//! pipes therefore costs nothing until the far end of the chain is drained.
//!
//! # Architecture
//!
//! ```text
//! starts ──> [ FilterPipe ] ──> [ CountPipe ] ──> consumer
//!              pull on demand     pull on demand
//! ```
//!
//! # Module Structure
//!
//! - `pipe`: The [`Pipe`] trait, the lazy-iteration contract, and the
//!   [`PipeIter`] adapter that lets any bound pipe drive a `for` loop
//! - `filter`: Predicate and sampling filters
//! - `sideeffect`: Pipes that accumulate an auxiliary result
//! - `split`: Fan-out of one upstream to many independent branches
//! - `pipeline`: Sequential composition of pipes

pub mod filter;
pub mod pipe;
pub mod pipeline;
pub mod sideeffect;
pub mod split;

pub use filter::{FilterPipe, RandomFilterPipe};
pub use pipe::{IdentityPipe, Pipe, PipeIter, Starts};
pub use pipeline::Pipeline;
pub use sideeffect::{AggregatorPipe, CountPipe, SideEffectPipe};
pub use split::{CopySplitPipe, SplitBranch};
