//! Condensed console reporters for execution lifecycle events.
//!
//! This crate turns the discrete lifecycle events of a playbook-style run
//! (task started, host/item result, file diff, include announcement, final
//! statistics) into compact, optionally color-coded terminal output. Its
//! signature behavior: skipped results print nothing, and a task banner
//! whose task produced no visible output is erased in place instead of
//! lingering on screen.
//!
//! # Architecture
//!
//! 1. **[`EventHandler`]** trait: one defaulted method per event kind. The
//!    defaulted trait is the no-op baseline; reporters override only the
//!    events they render.
//! 2. **[`ConsoleDisplay`]**: the injected output/error sinks, color
//!    handling, and the line discipline that makes in-place banner erasure
//!    possible.
//! 3. **[`BannerTracker`]**: ordered record of printed banners with a
//!    pending/confirmed state per task and a trailing-pending eviction rule.
//! 4. **Reporters**: [`CondensedReporter`] (the point of this crate) and
//!    [`NullReporter`] (the explicit baseline).
//!
//! The dispatcher that produces events is an external collaborator: it
//! invokes handler methods strictly sequentially on one thread, and the
//! payload types in [`events`] are the reporter-facing views of its data.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use condensed::prelude::*;
//!
//! let mut reporter = CondensedReporter::new();
//!
//! let task = TaskInfo::new("Install nginx", "package").with_uuid("t1");
//! reporter.on_task_start(&task)?;
//! reporter.on_host_ok(&task, &ResultInfo::changed("web1"))?;
//! reporter.on_host_skipped(&task, &ResultInfo::skipped("web2"))?; // silent
//!
//! let mut stats = RunStats::new();
//! stats.increment("web1", TaskStatus::Changed);
//! stats.increment("web2", TaskStatus::Skipped);
//! reporter.on_stats(&stats)?;
//! ```
//!
//! # Example Output
//!
//! ```text
//! TASK [Install nginx]
//!     web1
//!
//! PLAY RECAP
//! web1 : ok=0 changed=1 unreachable=0 failed=0
//! web2 : ok=0 changed=0 unreachable=0 failed=0
//! ```

pub mod banner;
pub mod diff;
pub mod display;
pub mod error;
pub mod events;
pub mod handler;
pub mod reporters;

// ============================================================================
// Flat Re-exports
// ============================================================================

pub use banner::{BannerState, BannerTracker};
pub use diff::{format_diff, generate_diff};
pub use display::{colorize, hostcolor, ConsoleDisplay};
pub use error::{Error, Result};
pub use events::{DiffInfo, HostCounts, ResultInfo, RunStats, TaskInfo, TaskStatus};
pub use handler::EventHandler;
pub use reporters::{CondensedConfig, CondensedReporter, NullReporter};

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for reporter development and usage.
pub mod prelude {
    pub use crate::banner::{BannerState, BannerTracker};
    pub use crate::display::ConsoleDisplay;
    pub use crate::error::{Error, Result};
    pub use crate::events::{DiffInfo, HostCounts, ResultInfo, RunStats, TaskInfo, TaskStatus};
    pub use crate::handler::EventHandler;
    pub use crate::reporters::{CondensedConfig, CondensedReporter, NullReporter};
}
