//! Accumulated statistics for one named operation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Count/time totals for a named operation, split into overall and
/// top-level-only figures, with an optional per-variation breakdown.
///
/// The invariants `total_count >= top_level_count` and
/// `total_time >= top_level_time` hold at all times: every top-level
/// invocation is also counted as a total invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationStat {
    /// Operation name this stat belongs to
    pub name: String,

    /// Invocations at any nesting depth
    pub total_count: u64,

    /// Seconds spent across all invocations (nested time counted once
    /// per enclosing frame, so outer frames include inner time)
    pub total_time: f64,

    /// Invocations with no enclosing tracked call
    pub top_level_count: u64,

    /// Seconds spent in top-level invocations
    pub top_level_time: f64,

    /// Breakdown by caller-supplied variation key
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub variations: BTreeMap<String, OperationStat>,
}

impl OperationStat {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            total_count: 0,
            total_time: 0.0,
            top_level_count: 0,
            top_level_time: 0.0,
            variations: BTreeMap::new(),
        }
    }

    pub(crate) fn record_entry(&mut self, top_level: bool) {
        self.total_count += 1;
        if top_level {
            self.top_level_count += 1;
        }
    }

    pub(crate) fn record_elapsed(&mut self, seconds: f64, top_level: bool) {
        self.total_time += seconds;
        if top_level {
            self.top_level_time += seconds;
        }
    }
}
