//! The event handler capability interface.
//!
//! An external dispatcher drives a reporter by invoking exactly one method
//! per lifecycle event, strictly sequentially, on a single thread. Every
//! method defaults to a no-op, so the trait itself is the baseline
//! implementation: a reporter overrides only the events it renders and lets
//! the rest fall through.
//!
//! Handlers are presentation-only and must not fail for any reason other
//! than a non-recoverable stream write error (see [`crate::error::Error`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use condensed::prelude::*;
//!
//! struct CountingHandler {
//!     results: usize,
//! }
//!
//! impl EventHandler for CountingHandler {
//!     fn on_host_ok(&mut self, _task: &TaskInfo, _result: &ResultInfo) -> Result<()> {
//!         self.results += 1;
//!         Ok(())
//!     }
//! }
//! ```

use crate::error::Result;
use crate::events::{ResultInfo, RunStats, TaskInfo};

/// Receiver for execution lifecycle events, one method per event kind.
pub trait EventHandler {
    /// A task is about to run; its banner may be printed.
    fn on_task_start(&mut self, task: &TaskInfo) -> Result<()> {
        let _ = task;
        Ok(())
    }

    /// A task finished on one host without failing or being skipped.
    fn on_host_ok(&mut self, task: &TaskInfo, result: &ResultInfo) -> Result<()> {
        let _ = (task, result);
        Ok(())
    }

    /// A task was skipped on one host.
    fn on_host_skipped(&mut self, task: &TaskInfo, result: &ResultInfo) -> Result<()> {
        let _ = (task, result);
        Ok(())
    }

    /// One loop item finished without failing or being skipped.
    fn on_item_ok(&mut self, task: &TaskInfo, result: &ResultInfo) -> Result<()> {
        let _ = (task, result);
        Ok(())
    }

    /// One loop item was skipped.
    fn on_item_skipped(&mut self, task: &TaskInfo, result: &ResultInfo) -> Result<()> {
        let _ = (task, result);
        Ok(())
    }

    /// A result carries a file diff to render.
    fn on_file_diff(&mut self, task: &TaskInfo, result: &ResultInfo) -> Result<()> {
        let _ = (task, result);
        Ok(())
    }

    /// A task file was included for a set of hosts.
    fn on_include_file(&mut self, filename: &str, hosts: &[String]) -> Result<()> {
        let _ = (filename, hosts);
        Ok(())
    }

    /// The run finished; final per-host statistics are available.
    fn on_stats(&mut self, stats: &RunStats) -> Result<()> {
        let _ = stats;
        Ok(())
    }
}
