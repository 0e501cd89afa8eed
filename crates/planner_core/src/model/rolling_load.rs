//! Rolling-load buffer: a small bounded-time deque, not an unbounded
//! collection. Pruning on insert is the invariant.

use std::collections::VecDeque;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::slot::DragFamily;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct LoadEntry {
    pub date: NaiveDate,
    pub minutes: u32,
    #[schemars(skip)]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub drag: Option<f32>,
}

/// Ordered (monotonic in calendar order) sequence of load entries. Entries
/// older than the configured window may be pruned; `prune` enforces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RollingLoadBuffer {
    entries: VecDeque<LoadEntry>,
}

impl RollingLoadBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry (if minutes > 0) and prune anything older than
    /// `window_days` relative to the entry's own date.
    pub fn record(&mut self, date: NaiveDate, minutes: u32, drag_family: Option<DragFamily>, window_days: i64) {
        if minutes > 0 {
            let drag = drag_family.map(|_| 1.0); // family is informational; magnitude lives in ParameterStore
            self.entries.push_back(LoadEntry { date, minutes, drag });
        }
        self.prune(date, window_days);
    }

    /// Drop entries strictly older than `window_days` before `as_of`.
    pub fn prune(&mut self, as_of: NaiveDate, window_days: i64) {
        let cutoff = as_of - chrono::Duration::days(window_days);
        while let Some(front) = self.entries.front() {
            if front.date < cutoff {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }

    /// Sum of minutes played within the `window_days` window ending on (and
    /// including) `as_of`.
    pub fn minutes_in_window(&self, as_of: NaiveDate, window_days: i64) -> u32 {
        let cutoff = as_of - chrono::Duration::days(window_days - 1);
        self.entries
            .iter()
            .filter(|e| e.date >= cutoff && e.date <= as_of)
            .map(|e| e.minutes)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
