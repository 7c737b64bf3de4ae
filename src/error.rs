//! Error types for the condensed reporter.
//!
//! Reporters are presentation-only: the only fallible operation they perform
//! is writing to their output streams. A broken pipe is recovered silently at
//! the display layer (a closed pager is not an error); every other stream
//! failure surfaces here and propagates to the dispatcher.

use thiserror::Error;

/// Result type alias for reporter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for reporter operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Stream write failure other than a broken pipe.
    #[error("failed to write to output stream: {0}")]
    Io(#[from] std::io::Error),
}
