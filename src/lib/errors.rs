//! Custom error types for pipe and channel operations.

use thiserror::Error;

/// Result type alias for pipe and channel operations
pub type Result<T> = std::result::Result<T, PipeError>;

/// Error type for pipe and channel operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipeError {
    /// No further element is available from an exhausted pipe
    #[error("pipe is exhausted: no further elements are available")]
    Exhausted,

    /// Operation not supported by a derived or shared sequence
    #[error("operation '{operation}' is not supported by this pipe")]
    Unsupported {
        /// The operation that was attempted
        operation: &'static str,
    },

    /// Write attempted on a channel that has been closed
    #[error("channel is closed")]
    Closed,
}
