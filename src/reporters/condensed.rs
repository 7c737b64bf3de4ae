//! Condensed console reporter.
//!
//! Reformats lifecycle events into compact terminal output: skipped results
//! disappear entirely, host lines are indented under a single `TASK [...]`
//! banner, and a banner whose task produced no visible output is erased in
//! place rather than left dangling.
//!
//! # Features
//!
//! - **Silent skips**: skipped hosts and items produce no output at all
//! - **Banner erasure**: a banner with no visible result under it is
//!   cleared when the next banner prints
//! - **Ok gating**: `show_ok_hosts = false` hides unchanged results too,
//!   leaving only changes on screen
//! - **Delegation labels**: `host -> delegated_host` when execution was
//!   delegated
//! - **Verbose dumps**: serialized results at `-v` or on module request
//! - **Recap table**: per-host ok/changed/unreachable/failed counters
//!
//! # Example Output
//!
//! ```text
//! TASK [Install nginx]
//!     web1
//!     web2
//!
//! TASK [Deploy configs]
//!     web1 => (item=nginx.conf)
//!     web1 => (item=vhosts.conf)
//!
//! PLAY RECAP
//! web1 : ok=3 changed=2 unreachable=0 failed=0
//! web2 : ok=4 changed=1 unreachable=0 failed=0
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use condensed::reporters::{CondensedConfig, CondensedReporter};
//!
//! // Default: write to stdout, show unchanged hosts in the ok color
//! let reporter = CondensedReporter::new();
//!
//! // Changes only
//! let reporter = CondensedReporter::with_config(CondensedConfig {
//!     show_ok_hosts: false,
//!     ..Default::default()
//! });
//!
//! dispatcher.attach(reporter);
//! ```

use std::io;

use is_terminal::IsTerminal;

use crate::banner::BannerTracker;
use crate::diff::format_diff;
use crate::display::{
    colorize, hostcolor, ConsoleDisplay, COLOR_CHANGED, COLOR_DEBUG, COLOR_ERROR, COLOR_OK,
    COLOR_SKIP, COLOR_UNREACHABLE,
};
use crate::error::Result;
use crate::events::{display_value, ResultInfo, RunStats, TaskInfo, TaskStatus};
use crate::handler::EventHandler;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the condensed reporter.
#[derive(Debug, Clone)]
pub struct CondensedConfig {
    /// Verbosity level: `> 0` appends result dumps, `>= 2` prints task paths
    pub verbosity: u8,
    /// Disable ANSI colors regardless of terminal detection
    pub no_color: bool,
    /// Echo task arguments into the banner line (suppressed by `no_log`)
    pub display_args_to_stdout: bool,
    /// Print unchanged results in the ok color; when false they print
    /// nothing at all
    pub show_ok_hosts: bool,
    /// Terminal width used when erasing a stale banner line
    pub columns: usize,
}

impl Default for CondensedConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            no_color: false,
            display_args_to_stdout: false,
            show_ok_hosts: true,
            columns: 80,
        }
    }
}

impl CondensedConfig {
    /// Configuration with the given verbosity.
    pub fn with_verbosity(verbosity: u8) -> Self {
        Self {
            verbosity,
            ..Default::default()
        }
    }

    /// Hide unchanged results entirely.
    pub fn changes_only(mut self) -> Self {
        self.show_ok_hosts = false;
        self
    }

    /// Disable colored output.
    pub fn without_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Echo task arguments into banner lines.
    pub fn with_args_to_stdout(mut self) -> Self {
        self.display_args_to_stdout = true;
        self
    }

    fn resolve_use_color(&self) -> bool {
        !self.no_color && std::env::var("NO_COLOR").is_err() && io::stdout().is_terminal()
    }
}

// ============================================================================
// Condensed Reporter
// ============================================================================

/// Reporter that hides skipped results and compresses task/host output.
///
/// Skipped host and item events deliberately fall through to the no-op trait
/// defaults: a skipped result produces no output and no banner transition.
///
/// # Usage
///
/// ```rust,ignore
/// use condensed::reporters::CondensedReporter;
///
/// let reporter = CondensedReporter::with_verbosity(1);
/// ```
#[derive(Debug)]
pub struct CondensedReporter {
    config: CondensedConfig,
    display: ConsoleDisplay,
    banners: BannerTracker,
}

impl CondensedReporter {
    /// Create a reporter with default configuration, writing to the process
    /// stdout/stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CondensedConfig::default())
    }

    /// Create a reporter with the given verbosity.
    #[must_use]
    pub fn with_verbosity(verbosity: u8) -> Self {
        Self::with_config(CondensedConfig::with_verbosity(verbosity))
    }

    /// Create a reporter with custom configuration, writing to the process
    /// stdout/stderr.
    #[must_use]
    pub fn with_config(config: CondensedConfig) -> Self {
        let display = ConsoleDisplay::stdout(config.resolve_use_color(), config.columns);
        Self::with_display(config, display)
    }

    /// Create a reporter over an injected display, e.g. capture sinks in
    /// tests or a host-managed stream pair.
    pub fn with_display(config: CondensedConfig, display: ConsoleDisplay) -> Self {
        Self {
            config,
            display,
            banners: BannerTracker::new(),
        }
    }

    /// The banner bookkeeping, exposed for state assertions.
    pub fn banners(&self) -> &BannerTracker {
        &self.banners
    }

    // ========================================================================
    // Banner Handling
    // ========================================================================

    /// Print the banner for `task`, erasing a stale pending banner first.
    fn print_task_banner(&mut self, task: &TaskInfo) -> Result<()> {
        let evicted = self.banners.begin(&task.task_uuid);
        for _ in &evicted {
            self.display.clear_line()?;
        }

        // After an in-place erase the cursor already sits on a blank line.
        let leading_newline = evicted.is_empty();
        let banner = self.format_task_banner(task);
        self.display.banner(&banner, None, leading_newline)?;

        if self.config.verbosity >= 2 {
            if let Some(path) = &task.task_path {
                self.display
                    .display(&format!("task path: {}", path), Some(COLOR_DEBUG))?;
            }
        }
        Ok(())
    }

    /// Reprint the banner when the last one printed belongs to another task,
    /// so out-of-order results always appear under their own banner.
    fn ensure_banner(&mut self, task: &TaskInfo) -> Result<()> {
        if !self.banners.is_current(&task.task_uuid) {
            self.print_task_banner(task)?;
        }
        Ok(())
    }

    fn format_task_banner(&self, task: &TaskInfo) -> String {
        let mut banner = format!("TASK [{}", task.name.trim());
        if self.config.display_args_to_stdout && !task.no_log && !task.args.is_empty() {
            let args = task
                .args
                .iter()
                .map(|(key, value)| format!("{}={}", key, display_value(value)))
                .collect::<Vec<_>>()
                .join(", ");
            banner.push(' ');
            banner.push_str(&args);
        }
        banner.push(']');
        banner
    }

    // ========================================================================
    // Result Lines
    // ========================================================================

    /// `host`, or `host -> delegated_host` when execution was delegated.
    fn host_label(result: &ResultInfo) -> String {
        match &result.delegated_host {
            Some(delegated) => format!("{} -> {}", result.host, delegated),
            None => result.host.clone(),
        }
    }

    fn run_is_verbose(&self, result: &ResultInfo) -> bool {
        (self.config.verbosity > 0 || result.verbose_always) && !result.verbose_override
    }

    fn surface_warnings(&mut self, result: &ResultInfo) -> Result<()> {
        for warning in &result.warnings {
            self.display.warning(warning)?;
        }
        Ok(())
    }

    /// Shared path for host- and item-level ok results.
    fn handle_ok(&mut self, task: &TaskInfo, result: &ResultInfo, item_level: bool) -> Result<()> {
        if task.is_include() {
            return Ok(());
        }

        let color = if result.changed {
            COLOR_CHANGED
        } else if self.config.show_ok_hosts {
            COLOR_OK
        } else {
            // Suppressed result: the banner stays unconfirmed so a task with
            // no visible output has its banner erased by the next one.
            return Ok(());
        };

        self.ensure_banner(task)?;
        self.banners.confirm(&task.task_uuid);
        self.surface_warnings(result)?;
        let clean = result.scrubbed(task);

        if !item_level && task.is_loop && !clean.items.is_empty() {
            return self.process_items(task, &clean);
        }

        let mut msg = format!("    {}", Self::host_label(&clean));
        if item_level {
            msg.push_str(&format!(" => (item={})", clean.item_label()));
        }
        if self.run_is_verbose(&clean) {
            msg.push_str(&format!(" => {}", clean.dump()));
        }
        self.display.display(&msg, Some(color))
    }

    /// Per-item processing for a host-level loop aggregate.
    fn process_items(&mut self, task: &TaskInfo, aggregate: &ResultInfo) -> Result<()> {
        for sub in &aggregate.items {
            if sub.status == TaskStatus::Skipped {
                continue;
            }
            let color = if sub.changed {
                COLOR_CHANGED
            } else if self.config.show_ok_hosts {
                COLOR_OK
            } else {
                continue;
            };

            let mut msg = format!("    {} => (item={})", Self::host_label(sub), sub.item_label());
            if self.run_is_verbose(sub) {
                msg.push_str(&format!(" => {}", sub.dump()));
            }
            self.display.display(&msg, Some(color))?;
        }
        Ok(())
    }

    fn print_diff(&mut self, result: &ResultInfo) -> Result<()> {
        if let Some(diff) = &result.diff {
            let text = format_diff(diff);
            let text = text.trim();
            if !text.is_empty() {
                self.display.display(text, None)?;
            }
        }
        Ok(())
    }
}

impl Default for CondensedReporter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// EventHandler Implementation
// ============================================================================

impl EventHandler for CondensedReporter {
    fn on_task_start(&mut self, task: &TaskInfo) -> Result<()> {
        self.print_task_banner(task)
    }

    fn on_host_ok(&mut self, task: &TaskInfo, result: &ResultInfo) -> Result<()> {
        self.handle_ok(task, result, false)
    }

    fn on_item_ok(&mut self, task: &TaskInfo, result: &ResultInfo) -> Result<()> {
        self.handle_ok(task, result, true)
    }

    // on_host_skipped / on_item_skipped inherit the no-op defaults.

    fn on_file_diff(&mut self, task: &TaskInfo, result: &ResultInfo) -> Result<()> {
        if task.no_log {
            return Ok(());
        }
        if task.is_loop && !result.items.is_empty() {
            for sub in &result.items {
                if sub.changed {
                    self.print_diff(sub)?;
                }
            }
            Ok(())
        } else if result.changed {
            self.print_diff(result)
        } else {
            Ok(())
        }
    }

    fn on_include_file(&mut self, filename: &str, hosts: &[String]) -> Result<()> {
        self.display.display("INCLUDE TASKS", None)?;
        let msg = format!("    {} => {}", hosts.join(", "), filename);
        self.display.display(&msg, Some(COLOR_SKIP))
    }

    fn on_stats(&mut self, stats: &RunStats) -> Result<()> {
        self.display.banner("PLAY RECAP", None, true)?;

        let use_color = self.display.use_color();
        for host in stats.processed_hosts() {
            let counts = stats.summarize(host);
            let line = format!(
                "{} : {} {} {} {}",
                hostcolor(host, &counts, use_color),
                colorize("ok", counts.ok, COLOR_OK, use_color),
                colorize("changed", counts.changed, COLOR_CHANGED, use_color),
                colorize(
                    "unreachable",
                    counts.unreachable,
                    COLOR_UNREACHABLE,
                    use_color
                ),
                colorize("failed", counts.failed, COLOR_ERROR, use_color),
            );
            self.display.display(&line, None)?;
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
