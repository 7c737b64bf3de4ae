//! Silent baseline reporter.

use crate::handler::EventHandler;

/// Reporter that produces no output for any event.
///
/// Every handler inherits the no-op trait default. Useful as the explicit
/// baseline to compose against, and in tests that need a handler without
/// caring about output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl NullReporter {
    /// Create a null reporter.
    pub fn new() -> Self {
        Self
    }
}

impl EventHandler for NullReporter {}
