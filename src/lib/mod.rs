#![deny(unsafe_code)]
// Clippy lint configuration for CI
// These lints are allowed because:
// - missing_*_doc: Documentation improvements tracked separately
// - needless_pass_by_value: Some APIs designed for ownership transfer
// - items_after_statements: Some test code uses late item declarations
// - match_same_arms: Sometimes clearer to list arms explicitly
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value,
    clippy::items_after_statements,
    clippy::match_same_arms,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

//! # graphpipes - Graph Traversal Execution Layer
//!
//! This library provides the execution primitives for graph traversals:
//! lazily-evaluated pull-based pipelines ("pipes") and a concurrent,
//! channel-connected process network ("pipex").
//!
//! ## Overview
//!
//! The library is organized into two subsystems plus their shared
//! collaborators:
//!
//! ### Pipes (single-threaded, lazy)
//!
//! - **[`pipes::pipe`]** - The [`Pipe`] trait and its lazy-iteration
//!   contract: idempotent availability checks, a one-element cache, and a
//!   monotonic exhaustion flag
//! - **[`pipes::filter`]** - Predicate and sampling filters
//! - **[`pipes::sideeffect`]** - Pipes that accumulate an auxiliary result
//!   (counting, aggregation) while forwarding their output
//! - **[`pipes::split`]** - Fan-out of one upstream sequence to many
//!   independent branches without recomputation
//! - **[`pipes::pipeline`]** - Sequential composition of pipes
//!
//! ### Pipex (multi-threaded, channel-connected)
//!
//! - **[`pipex::channel`]** - A bounded, closable FIFO channel with
//!   blocking reads and writes; the sole flow-control mechanism
//! - **[`pipex::process`]** - Processes that read one channel, transform,
//!   and write another, each on its own thread
//! - **[`pipex::reader`]** - A terminal counting sink with a one-shot
//!   completion latch
//! - **[`pipex::network`]** - Spawning and joining a network of processes
//!
//! ### Collaborators
//!
//! - **[`graph`]** - The minimal [`Graph`]/[`Edge`] contract through which
//!   storage backends feed element sequences into pipelines
//! - **[`errors`]** - The [`PipeError`] taxonomy shared by both subsystems
//!
//! ## Quick Start
//!
//! ### A lazy pipe chain
//!
//! ```
//! use graphpipes::{CountPipe, FilterPipe, Pipe, SideEffectPipe};
//!
//! let names = vec!["marko", "vadas", "josh", "peter"];
//! let mut filter = FilterPipe::new(|name: &&str| name.starts_with(['j', 'm']));
//! filter.set_starts(Box::new(names.into_iter())).unwrap();
//!
//! let mut count = CountPipe::new();
//! count.set_starts(Box::new(filter.ends())).unwrap();
//!
//! let survivors: Vec<&str> = (&mut count).ends().collect();
//! assert_eq!(survivors, vec!["marko", "josh"]);
//! assert_eq!(*count.side_effect(), 2);
//! ```
//!
//! ### A concurrent process network
//!
//! ```
//! use graphpipes::{Channel, ChannelReader, IdentityProcess, ProcessNetwork};
//! use std::sync::Arc;
//!
//! let upstream = Arc::new(Channel::new(4));
//! let downstream = Arc::new(Channel::new(4));
//!
//! let mut network = ProcessNetwork::new();
//! network.spawn_source(Arc::clone(&upstream), 0..100);
//! network.spawn_process(IdentityProcess::new(), Arc::clone(&upstream), Arc::clone(&downstream));
//! let mut sink = ChannelReader::spawn(Arc::clone(&downstream));
//!
//! assert_eq!(sink.result(), 100);
//! network.join().unwrap();
//! ```

pub mod errors;
pub mod graph;
pub mod pipes;
pub mod pipex;

pub use errors::{PipeError, Result};
pub use graph::{AdjacencyGraph, Edge, Graph, LabeledEdge};
pub use pipes::filter::{FilterPipe, RandomFilterPipe};
pub use pipes::pipe::{IdentityPipe, Pipe, PipeIter, Starts};
pub use pipes::pipeline::Pipeline;
pub use pipes::sideeffect::{AggregatorPipe, CountPipe, SideEffectPipe};
pub use pipes::split::{CopySplitPipe, SplitBranch};
pub use pipex::channel::Channel;
pub use pipex::network::ProcessNetwork;
pub use pipex::process::{Endpoint, EdgeVertexProcess, IdentityProcess, Process, SerialProcess};
pub use pipex::reader::ChannelReader;
