//! Shared helpers for reporter integration tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use condensed::display::ConsoleDisplay;
use condensed::reporters::{CondensedConfig, CondensedReporter};

/// A cloneable buffer that captures written bytes for assertions.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The captured output as a string.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().unwrap()).to_string()
    }

    /// The captured output with ANSI escape codes removed.
    pub fn stripped(&self) -> String {
        strip_ansi_escapes::strip_str(self.output())
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.output().contains(pattern)
    }

    pub fn count_occurrences(&self, pattern: &str) -> usize {
        self.output().matches(pattern).count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Build a condensed reporter over capture sinks.
///
/// Color is driven by `config.no_color` alone so tests stay deterministic
/// regardless of the environment they run in.
pub fn capture_reporter(
    config: CondensedConfig,
) -> (CondensedReporter, CaptureBuffer, CaptureBuffer) {
    let out = CaptureBuffer::new();
    let err = CaptureBuffer::new();
    let display = ConsoleDisplay::new(
        Box::new(out.clone()),
        Box::new(err.clone()),
        !config.no_color,
        config.columns,
    );
    (CondensedReporter::with_display(config, display), out, err)
}

/// The byte sequence `clear_line` emits for the given terminal width.
pub fn clear_sequence(columns: usize) -> String {
    format!("\r{}\r", " ".repeat(columns))
}
