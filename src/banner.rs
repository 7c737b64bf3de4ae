//! Ordered bookkeeping for task banners.
//!
//! A banner goes through three states: it does not exist, it is `Pending`
//! (printed, awaiting its first visible result), or it is `Confirmed` (a
//! result line was printed under it). A `Pending` banner that is superseded
//! by a new one is evicted instead, and the caller erases its line.
//!
//! Eviction rule: when a new banner begins, entries are popped from the tail
//! of the record while they are still `Pending`; the first `Confirmed` entry
//! stops the sweep. Since every visible result confirms its banner, at most
//! one entry is ever `Pending`.

use indexmap::IndexMap;

/// Lifecycle state of a printed task banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerState {
    /// Banner line printed, no visible result yet
    Pending,
    /// At least one visible result line printed under the banner
    Confirmed,
}

/// Insertion-ordered record of task banners for one run.
#[derive(Debug, Clone, Default)]
pub struct BannerTracker {
    entries: IndexMap<String, BannerState>,
    last_banner: Option<String>,
}

impl BannerTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new banner, evicting trailing `Pending` entries.
    ///
    /// Returns the evicted task uuids, most recent first; the caller erases
    /// one output line per eviction. The new banner is recorded as `Pending`
    /// and becomes the last printed banner.
    pub fn begin(&mut self, uuid: &str) -> Vec<String> {
        let mut evicted = Vec::new();
        while let Some((last, state)) = self.entries.last().map(|(k, v)| (k.clone(), *v)) {
            if state != BannerState::Pending {
                break;
            }
            self.entries.shift_remove(&last);
            evicted.push(last);
        }

        // A reprinted banner moves to the tail; the record stays ordered by
        // most recent print.
        self.entries.shift_remove(uuid);
        self.entries.insert(uuid.to_string(), BannerState::Pending);
        self.last_banner = Some(uuid.to_string());
        evicted
    }

    /// Mark a banner as confirmed by a visible result line.
    pub fn confirm(&mut self, uuid: &str) {
        self.entries
            .insert(uuid.to_string(), BannerState::Confirmed);
    }

    /// Whether `uuid` is the most recently printed banner.
    pub fn is_current(&self, uuid: &str) -> bool {
        self.last_banner.as_deref() == Some(uuid)
    }

    /// The uuid of the banner still awaiting a result, if any.
    pub fn pending(&self) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(_, state)| **state == BannerState::Pending)
            .map(|(uuid, _)| uuid.as_str())
    }

    /// State of one banner, if it was ever begun.
    pub fn state(&self, uuid: &str) -> Option<BannerState> {
        self.entries.get(uuid).copied()
    }

    /// Number of recorded banners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no banner has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget all banner state, e.g. between runs.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.last_banner = None;
    }
}
