//! Spawning and joining a network of processes.
//!
//! A [`ProcessNetwork`] collects the join handles of every source and
//! process thread it spawns, and [`join`](ProcessNetwork::join) waits for
//! all of them, converting a worker panic into an error instead of
//! swallowing it. Output channels are closed by the workers themselves
//! (on completion or abort), so a panicked stage still terminates its
//! downstream consumers before `join` reports the failure.

use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::{Result, anyhow};

use crate::pipex::channel::Channel;
use crate::pipex::process::{Process, SerialProcess, spawn_source};

/// Extract a readable message from a worker thread's panic payload.
fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Owner of the threads making up one acyclic process network.
#[derive(Default)]
pub struct ProcessNetwork {
    handles: Vec<JoinHandle<()>>,
}

impl ProcessNetwork {
    /// Create an empty network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a source thread draining `items` into `output`, closing it
    /// when done.
    pub fn spawn_source<T, I>(&mut self, output: Arc<Channel<T>>, items: I)
    where
        T: Send + 'static,
        I: IntoIterator<Item = T> + Send + 'static,
    {
        self.handles.push(spawn_source(output, items));
    }

    /// Spawn a process thread between `input` and `output`.
    pub fn spawn_process<P>(
        &mut self,
        process: P,
        input: Arc<Channel<P::In>>,
        output: Arc<Channel<P::Out>>,
    ) where
        P: Process + Send + 'static,
        P::In: Send + 'static,
        P::Out: Send + 'static,
    {
        self.handles.push(SerialProcess::new(process, input, output).spawn());
    }

    /// Number of threads spawned so far.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.handles.len()
    }

    /// Wait for every spawned thread.
    ///
    /// Returns the first worker panic as an error; the remaining threads
    /// are still joined before returning.
    pub fn join(self) -> Result<()> {
        let mut first_failure = None;
        for handle in self.handles {
            if let Err(panic) = handle.join() {
                let failure = anyhow!("worker thread panicked: {}", panic_message(panic));
                log::error!("{failure}");
                first_failure.get_or_insert(failure);
            }
        }
        match first_failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}
