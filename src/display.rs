//! Terminal output sink for reporters.
//!
//! [`ConsoleDisplay`] owns the output and error streams a reporter writes to.
//! Both streams are injected by the host, along with color enablement and the
//! terminal width, so reporters never reach for process globals.
//!
//! ## Line discipline
//!
//! Each message occupies one line, but the newline that terminates a line is
//! written as the prefix of the *next* message. The cursor therefore parks at
//! the end of the most recently printed line, which is what allows
//! [`ConsoleDisplay::clear_line`] to erase an unconfirmed task banner in
//! place before the next banner replaces it.
//!
//! ## Failure semantics
//!
//! Every write is flushed before returning so output ordering holds against
//! interleaved logging. A broken pipe means the downstream consumer (a pager,
//! usually) went away: the write is swallowed and execution continues. Any
//! other stream error propagates.

use std::fmt;
use std::io::{self, Write};

use colored::{Color, Colorize};

use crate::error::Result;
use crate::events::HostCounts;

// ============================================================================
// Color Roles
// ============================================================================

/// Color for unchanged, successful results.
pub const COLOR_OK: Color = Color::Green;
/// Color for results that made changes.
pub const COLOR_CHANGED: Color = Color::Yellow;
/// Color for failures.
pub const COLOR_ERROR: Color = Color::Red;
/// Color for skipped output (used for include announcements).
pub const COLOR_SKIP: Color = Color::Cyan;
/// Color for unreachable hosts.
pub const COLOR_UNREACHABLE: Color = Color::BrightRed;
/// Color for debug-level detail such as task paths.
pub const COLOR_DEBUG: Color = Color::BrightBlack;
/// Color for warnings on the error stream.
pub const COLOR_WARN: Color = Color::BrightMagenta;

// ============================================================================
// Console Display
// ============================================================================

/// Injected output sink with color support and in-place line erasure.
pub struct ConsoleDisplay {
    out: Box<dyn Write>,
    err: Box<dyn Write>,
    use_color: bool,
    columns: usize,
}

impl ConsoleDisplay {
    /// Create a display over arbitrary sinks.
    pub fn new(out: Box<dyn Write>, err: Box<dyn Write>, use_color: bool, columns: usize) -> Self {
        Self {
            out,
            err,
            use_color,
            columns,
        }
    }

    /// Create a display over the process stdout/stderr.
    pub fn stdout(use_color: bool, columns: usize) -> Self {
        Self::new(
            Box::new(io::stdout()),
            Box::new(io::stderr()),
            use_color,
            columns,
        )
    }

    /// Whether ANSI colors are applied to output.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print one line to the output stream.
    pub fn display(&mut self, msg: &str, color: Option<Color>) -> Result<()> {
        self.emit(msg, color, true)
    }

    /// Print a banner line, trimmed.
    ///
    /// `leading_newline` is false when a stale banner was just erased in
    /// place: the cursor already sits at the start of a blank line.
    pub fn banner(&mut self, msg: &str, color: Option<Color>, leading_newline: bool) -> Result<()> {
        self.emit(msg.trim(), color, leading_newline)
    }

    /// Erase the current line: carriage return, a terminal width of spaces,
    /// carriage return.
    pub fn clear_line(&mut self) -> Result<()> {
        let blank = format!("\r{:width$}\r", "", width = self.columns);
        write_stream(&mut self.out, blank.as_bytes())
    }

    /// Print a warning to the error stream, mirrored to the tracing
    /// subscriber.
    pub fn warning(&mut self, msg: &str) -> Result<()> {
        tracing::warn!(target: "condensed", "{}", msg);
        let line = format!("[WARNING]: {}", msg);
        let painted = self.paint(&line, Some(COLOR_WARN));
        write_stream(&mut self.err, format!("\n{}", painted).as_bytes())
    }

    fn emit(&mut self, msg: &str, color: Option<Color>, leading_newline: bool) -> Result<()> {
        let painted = self.paint(msg, color);
        let text = if leading_newline {
            format!("\n{}", painted)
        } else {
            painted
        };
        write_stream(&mut self.out, text.as_bytes())
    }

    fn paint(&self, msg: &str, color: Option<Color>) -> String {
        match color {
            Some(color) if self.use_color => msg.color(color).to_string(),
            _ => msg.to_string(),
        }
    }
}

impl fmt::Debug for ConsoleDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleDisplay")
            .field("use_color", &self.use_color)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

fn write_stream(stream: &mut dyn Write, bytes: &[u8]) -> Result<()> {
    match stream.write_all(bytes).and_then(|_| stream.flush()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!(target: "condensed", "output stream closed, suppressing write");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// Recap Helpers
// ============================================================================

/// Format one recap counter as `label=n`, colorized only when nonzero.
pub fn colorize(label: &str, count: u32, color: Color, use_color: bool) -> String {
    let token = format!("{}={}", label, count);
    if use_color && count != 0 {
        token.color(color).to_string()
    } else {
        token
    }
}

/// Colorize a recap host name by its worst status: failures or unreachable
/// attempts win over changes, changes win over a clean run.
pub fn hostcolor(host: &str, counts: &HostCounts, use_color: bool) -> String {
    if !use_color {
        return host.to_string();
    }
    if counts.has_failures() {
        host.color(COLOR_ERROR).to_string()
    } else if counts.has_changes() {
        host.color(COLOR_CHANGED).to_string()
    } else {
        host.color(COLOR_OK).to_string()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
