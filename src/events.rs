//! Event payload types consumed by reporters.
//!
//! These are the reporter-facing views of what the execution engine produces:
//! task metadata, per-host and per-item outcome records, file diffs, and the
//! end-of-run statistics table. The engine owns the data; reporters only read
//! it (plus one side-effect-free scrubbing pass before formatting, see
//! [`ResultInfo::scrubbed`]).
//!
//! ## Type overview
//!
//! - [`TaskInfo`] - metadata for a task whose banner may be printed
//! - [`ResultInfo`] - outcome of a task on one host, or of one loop item
//! - [`TaskStatus`] - ok / changed / failed / skipped / unreachable
//! - [`DiffInfo`] - before/after payload for `--diff`-style output
//! - [`RunStats`] / [`HostCounts`] - per-host counters for the final recap

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Marker substituted for result payloads when a task sets `no_log`.
const CENSORED: &str = "the output has been hidden due to the use of no_log";

// ============================================================================
// Task Status
// ============================================================================

/// Status of a task execution on a single host (or of a single loop item).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Completed successfully without changes
    Ok,
    /// Completed successfully with changes
    Changed,
    /// Failed
    Failed,
    /// Skipped (condition not met)
    Skipped,
    /// Host was unreachable
    Unreachable,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Ok
    }
}

// ============================================================================
// Task Metadata
// ============================================================================

/// Metadata for a task, as announced by a task-start event.
///
/// The reporter keys its banner bookkeeping on `task_uuid`; everything else
/// is display material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInfo {
    /// Task name, as written in the play
    pub name: String,
    /// Action/module kind (e.g. "package", "template", "include_tasks")
    pub action: String,
    /// Task arguments, in declaration order
    #[serde(default)]
    pub args: IndexMap<String, JsonValue>,
    /// Unique task identifier, used to correlate results with banners
    pub task_uuid: String,
    /// Source location of the task, shown at higher verbosity
    pub task_path: Option<String>,
    /// Whether the task loops over items
    pub is_loop: bool,
    /// Whether output for this task is suppressed from logs
    pub no_log: bool,
}

impl TaskInfo {
    /// Create a new `TaskInfo` with a generated uuid.
    pub fn new(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: action.into(),
            args: IndexMap::new(),
            task_uuid: generate_uuid(),
            task_path: None,
            is_loop: false,
            no_log: false,
        }
    }

    /// Set the task arguments.
    pub fn with_args(mut self, args: IndexMap<String, JsonValue>) -> Self {
        self.args = args;
        self
    }

    /// Set the task uuid.
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.task_uuid = uuid.into();
        self
    }

    /// Set the source path of the task.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.task_path = Some(path.into());
        self
    }

    /// Mark the task as looping over items.
    pub fn with_loop(mut self) -> Self {
        self.is_loop = true;
        self
    }

    /// Suppress logging of this task's output.
    pub fn with_no_log(mut self) -> Self {
        self.no_log = true;
        self
    }

    /// Whether this is an include pseudo-task. Include results carry no
    /// outcome of their own and are never printed.
    pub fn is_include(&self) -> bool {
        matches!(
            self.action.as_str(),
            "include" | "include_tasks" | "include_role"
        )
    }
}

// ============================================================================
// Result Record
// ============================================================================

/// Outcome of a task on one host, or of a single loop item.
///
/// A host-level result for a looping task aggregates its per-item outcomes in
/// `items`; reporters format those through their item path instead of
/// emitting a single line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultInfo {
    /// Host the task ran on
    pub host: String,
    /// Final status
    pub status: TaskStatus,
    /// Whether something was changed
    pub changed: bool,
    /// Message from the module
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Host execution was delegated to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegated_host: Option<String>,
    /// The loop item this result belongs to (item-level results only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<JsonValue>,
    /// Aggregated per-item results (host-level results of looping tasks)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ResultInfo>,
    /// File diff payload, when diff mode produced one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffInfo>,
    /// Module-specific result data
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub data: IndexMap<String, JsonValue>,
    /// Warnings raised during execution
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// The module asked for its result to always be dumped
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub verbose_always: bool,
    /// The module asked for its result to never be dumped
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub verbose_override: bool,
}

impl ResultInfo {
    fn with_status(host: impl Into<String>, status: TaskStatus, changed: bool) -> Self {
        Self {
            host: host.into(),
            status,
            changed,
            msg: None,
            delegated_host: None,
            item: None,
            items: Vec::new(),
            diff: None,
            data: IndexMap::new(),
            warnings: Vec::new(),
            verbose_always: false,
            verbose_override: false,
        }
    }

    /// Create an unchanged, successful result.
    pub fn ok(host: impl Into<String>) -> Self {
        Self::with_status(host, TaskStatus::Ok, false)
    }

    /// Create a successful result that made changes.
    pub fn changed(host: impl Into<String>) -> Self {
        Self::with_status(host, TaskStatus::Changed, true)
    }

    /// Create a failed result.
    pub fn failed(host: impl Into<String>) -> Self {
        Self::with_status(host, TaskStatus::Failed, false)
    }

    /// Create a skipped result.
    pub fn skipped(host: impl Into<String>) -> Self {
        Self::with_status(host, TaskStatus::Skipped, false)
    }

    /// Create an unreachable result.
    pub fn unreachable(host: impl Into<String>) -> Self {
        Self::with_status(host, TaskStatus::Unreachable, false)
    }

    /// Set the module message.
    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }

    /// Mark the result as delegated to another host.
    pub fn with_delegated_host(mut self, host: impl Into<String>) -> Self {
        self.delegated_host = Some(host.into());
        self
    }

    /// Attach the loop item this result belongs to.
    pub fn with_item(mut self, item: JsonValue) -> Self {
        self.item = Some(item);
        self
    }

    /// Attach aggregated per-item results.
    pub fn with_items(mut self, items: Vec<ResultInfo>) -> Self {
        self.items = items;
        self
    }

    /// Attach a file diff.
    pub fn with_diff(mut self, diff: DiffInfo) -> Self {
        self.diff = Some(diff);
        self
    }

    /// Attach module result data.
    pub fn with_data(mut self, data: IndexMap<String, JsonValue>) -> Self {
        self.data = data;
        self
    }

    /// Add a warning.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Request that this result is always dumped, regardless of verbosity.
    pub fn with_verbose_always(mut self) -> Self {
        self.verbose_always = true;
        self
    }

    /// Request that this result is never dumped.
    pub fn with_verbose_override(mut self) -> Self {
        self.verbose_override = true;
        self
    }

    /// Display label for the loop item this result belongs to.
    pub fn item_label(&self) -> String {
        self.item
            .as_ref()
            .map(display_value)
            .unwrap_or_else(|| "null".to_string())
    }

    /// Serialize the outcome for verbose ` => {...}` dumps.
    pub fn dump(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// The log-scrubbing pass, run before any formatting.
    ///
    /// With `no_log` set on the task, every payload-bearing field is replaced
    /// by a censored marker. Otherwise engine-internal bookkeeping keys are
    /// dropped from `data`. Aggregated items are scrubbed recursively.
    pub fn scrubbed(&self, task: &TaskInfo) -> ResultInfo {
        if task.no_log {
            let mut censored = Self::with_status(self.host.clone(), self.status, self.changed);
            censored.delegated_host = self.delegated_host.clone();
            censored.msg = Some(CENSORED.to_string());
            if self.item.is_some() {
                censored.item = Some(JsonValue::String(CENSORED.to_string()));
            }
            censored.items = self.items.iter().map(|sub| sub.scrubbed(task)).collect();
            return censored;
        }

        let mut clean = self.clone();
        clean
            .data
            .retain(|key, _| key != "invocation" && !key.starts_with("_internal_"));
        clean.items = clean.items.iter().map(|sub| sub.scrubbed(task)).collect();
        clean
    }
}

/// Render a JSON value the way it should appear inline: strings bare,
/// everything else compact-encoded.
pub(crate) fn display_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Diff Payload
// ============================================================================

/// File diff payload carried by a result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiffInfo {
    /// Content before the change
    pub before: Option<String>,
    /// Content after the change
    pub after: Option<String>,
    /// Label for the before content
    pub before_header: Option<String>,
    /// Label for the after content
    pub after_header: Option<String>,
    /// Pre-rendered diff text; takes precedence over before/after
    pub prepared: Option<String>,
}

impl DiffInfo {
    /// Create an empty `DiffInfo`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set before content.
    pub fn with_before(mut self, content: impl Into<String>) -> Self {
        self.before = Some(content.into());
        self
    }

    /// Set after content.
    pub fn with_after(mut self, content: impl Into<String>) -> Self {
        self.after = Some(content.into());
        self
    }

    /// Set the before/after labels.
    pub fn with_headers(
        mut self,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        self.before_header = Some(before.into());
        self.after_header = Some(after.into());
        self
    }

    /// Set pre-rendered diff text.
    pub fn with_prepared(mut self, text: impl Into<String>) -> Self {
        self.prepared = Some(text.into());
        self
    }
}

// ============================================================================
// Run Statistics
// ============================================================================

/// Per-host counters, consumed once at run end for the recap table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCounts {
    /// Successful tasks with no changes
    pub ok: u32,
    /// Tasks that made changes
    pub changed: u32,
    /// Failed tasks
    pub failed: u32,
    /// Skipped tasks
    pub skipped: u32,
    /// Tasks where the host was unreachable
    pub unreachable: u32,
}

impl HostCounts {
    /// Whether this host had failures or was unreachable.
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.unreachable > 0
    }

    /// Whether this host had any changes.
    pub fn has_changes(&self) -> bool {
        self.changed > 0
    }

    /// Total number of recorded task outcomes.
    pub fn total(&self) -> u32 {
        self.ok + self.changed + self.failed + self.skipped + self.unreachable
    }
}

/// Statistics for a whole run, keyed by host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    hosts: std::collections::HashMap<String, HostCounts>,
}

impl RunStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one task outcome for a host.
    pub fn increment(&mut self, host: &str, status: TaskStatus) {
        let counts = self.hosts.entry(host.to_string()).or_default();
        match status {
            TaskStatus::Ok => counts.ok += 1,
            TaskStatus::Changed => counts.changed += 1,
            TaskStatus::Failed => counts.failed += 1,
            TaskStatus::Skipped => counts.skipped += 1,
            TaskStatus::Unreachable => counts.unreachable += 1,
        }
    }

    /// Counters for one host; zeroes for hosts that never ran anything.
    pub fn summarize(&self, host: &str) -> HostCounts {
        self.hosts.get(host).copied().unwrap_or_default()
    }

    /// Hosts that appear in the statistics, in lexicographic order.
    pub fn processed_hosts(&self) -> Vec<&str> {
        let mut hosts: Vec<&str> = self.hosts.keys().map(String::as_str).collect();
        hosts.sort_unstable();
        hosts
    }

    /// Whether no host has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

/// Generate a unique-enough task identifier for locally constructed tasks.
fn generate_uuid() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("task-{:016x}-{:08x}", now.as_nanos() as u64, std::process::id())
}

// ============================================================================
// Unit Tests
// ============================================================================
