//! Processes: channel-to-channel transforms, one thread each.
//!
//! A [`Process`] is the transform itself; a [`SerialProcess`] runs one on
//! its own thread, repeatedly reading the input channel, stepping, and
//! writing the output channel. On input exhaustion — or on any abort —
//! the output channel is closed exactly once so downstream consumers
//! terminate instead of hanging; a drop guard makes that hold even if a
//! step panics.

use std::marker::PhantomData;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::graph::Edge;
use crate::pipex::channel::Channel;

/// A unit of work between two channels: consumes one input item,
/// produces zero or one output item.
pub trait Process {
    /// The item type read from the input channel.
    type In;
    /// The item type written to the output channel.
    type Out;

    /// Transform one input item.
    fn step(&mut self, input: Self::In) -> Option<Self::Out>;
}

/// Forwards every input item unchanged.
pub struct IdentityProcess<T> {
    _marker: PhantomData<T>,
}

impl<T> IdentityProcess<T> {
    /// Create a pass-through process.
    #[must_use]
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> Default for IdentityProcess<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Process for IdentityProcess<T> {
    type In = T;
    type Out = T;

    fn step(&mut self, input: T) -> Option<T> {
        Some(input)
    }
}

/// Which endpoint of an edge an [`EdgeVertexProcess`] emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The tail vertex the edge leaves.
    Out,
    /// The head vertex the edge arrives at.
    In,
}

/// Consumes edges and emits one configured endpoint vertex per edge.
///
/// The endpoint choice is bound at construction and never changes over
/// the process's lifetime.
pub struct EdgeVertexProcess<E> {
    endpoint: Endpoint,
    _marker: PhantomData<E>,
}

impl<E: Edge> EdgeVertexProcess<E> {
    /// Create an edge-to-vertex transform for the given endpoint.
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint, _marker: PhantomData }
    }
}

impl<E: Edge> Process for EdgeVertexProcess<E> {
    type In = E;
    type Out = E::Vertex;

    fn step(&mut self, edge: E) -> Option<E::Vertex> {
        match self.endpoint {
            Endpoint::Out => Some(edge.out_vertex()),
            Endpoint::In => Some(edge.in_vertex()),
        }
    }
}

/// Closes a channel when dropped. Idempotent by `Channel::close`, so the
/// normal completion path and the panic path can share it.
pub(crate) struct CloseOnDrop<T> {
    channel: Arc<Channel<T>>,
}

impl<T> CloseOnDrop<T> {
    pub(crate) fn new(channel: Arc<Channel<T>>) -> Self {
        Self { channel }
    }
}

impl<T> Drop for CloseOnDrop<T> {
    fn drop(&mut self) {
        self.channel.close();
    }
}

/// Runs one [`Process`] on its own thread between two shared channels.
///
/// Lifecycle: created by [`new`](SerialProcess::new), running after
/// [`spawn`](SerialProcess::spawn), completed once the input channel is
/// drained — at which point the output channel has been closed exactly
/// once. A completed process never runs again.
pub struct SerialProcess<P: Process> {
    process: P,
    input: Arc<Channel<P::In>>,
    output: Arc<Channel<P::Out>>,
}

impl<P: Process> SerialProcess<P> {
    /// Wire a process between an input and an output channel.
    ///
    /// The channels are shared, not owned: other processes may feed the
    /// same input or drain the same output.
    #[must_use]
    pub fn new(process: P, input: Arc<Channel<P::In>>, output: Arc<Channel<P::Out>>) -> Self {
        Self { process, input, output }
    }

    /// Execute the read/step/write loop on the current thread.
    ///
    /// Returns once the input channel signals termination or a write
    /// fails because downstream closed; either way the output channel is
    /// closed before returning.
    pub fn run(mut self) {
        let _close_output = CloseOnDrop::new(Arc::clone(&self.output));
        while let Some(item) = self.input.read() {
            if let Some(out) = self.process.step(item) {
                if let Err(e) = self.output.write(out) {
                    log::error!("process aborted, downstream closed: {e}");
                    return;
                }
            }
        }
    }
}

impl<P> SerialProcess<P>
where
    P: Process + Send + 'static,
    P::In: Send + 'static,
    P::Out: Send + 'static,
{
    /// Run the process on its own thread.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<()> {
        thread::spawn(move || self.run())
    }
}

/// Drain an iterator into a channel on a background thread, then close
/// the channel.
///
/// This is how graph scans (or any pipes chain) enter a process network.
/// If the channel is closed from the consuming side first, the source
/// aborts and the remaining items are dropped.
pub fn spawn_source<T, I>(output: Arc<Channel<T>>, items: I) -> JoinHandle<()>
where
    T: Send + 'static,
    I: IntoIterator<Item = T> + Send + 'static,
{
    thread::spawn(move || {
        let _close_output = CloseOnDrop::new(Arc::clone(&output));
        for item in items {
            if let Err(e) = output.write(item) {
                log::error!("source aborted, downstream closed: {e}");
                return;
            }
        }
    })
}
