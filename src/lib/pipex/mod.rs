//! Concurrent, channel-connected process network.
//!
//! Where the pipes framework is single-threaded and pull-driven, a pipex
//! network runs its stages in parallel: each process owns a thread, reads
//! from one bounded channel, transforms, and writes to another. Bounded
//! capacity is the sole flow control (a fast producer blocks on a full
//! channel) and closing a channel is the sole termination signal (readers
//! drain what is buffered, then observe the close).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   channel   ┌──────────┐   channel   ┌──────────────┐
//! │  Source   │───────────>│ Process  │───────────>│ ChannelReader │
//! │ (thread)  │  bounded   │ (thread) │  bounded   │   (thread)    │
//! └──────────┘             └──────────┘             └──────────────┘
//!      writes, then closes      closes own output        counts, fires
//!                               on input exhaustion      completion latch
//! ```
//!
//! Process graphs must be wired acyclic; a cycle or an unclosed output
//! channel leaves downstream consumers blocked forever.
//!
//! # Module Structure
//!
//! - `channel`: The bounded, closable FIFO connecting two stages
//! - `process`: The [`Process`] trait, the [`SerialProcess`] thread
//!   runner, and concrete transforms
//! - `reader`: The counting sink with a one-shot completion latch
//! - `network`: Spawning and joining a whole network

pub mod channel;
pub mod network;
pub mod process;
pub mod reader;

pub use channel::Channel;
pub use network::ProcessNetwork;
pub use process::{Endpoint, EdgeVertexProcess, IdentityProcess, Process, SerialProcess};
pub use reader::ChannelReader;
