//! Report schema definitions.
//!
//! These are the structures a report consumer receives. The schema is
//! versioned to allow future evolution.

use serde::{Deserialize, Serialize};

use crate::profiler::{EventProfiler, ProfileSnapshot};
use crate::tracker::{CallTracker, OperationStat};
use crate::utils::config::{RankMetric, SCHEMA_VERSION};

/// Finalized results for one profiled event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventProfileReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Name of the profiled event
    pub event: String,

    /// Field the rankings are ordered by
    pub rank_by: RankMetric,

    /// Run totals and ranked groups/units
    #[serde(flatten)]
    pub snapshot: ProfileSnapshot,
}

impl EventProfileReport {
    /// Capture a profiler's current results as a report document.
    pub fn from_profiler(profiler: &EventProfiler) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            event: profiler.event().to_string(),
            rank_by: profiler.rank_by(),
            snapshot: profiler.results(),
        }
    }
}

/// Finalized nested-call accounting results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Per-operation stats, heaviest total time first
    pub stats: Vec<OperationStat>,

    /// Captured call stacks, one per completed top-level invocation
    pub stacks: Vec<Vec<String>>,
}

impl TrackerReport {
    /// Capture a tracker's accumulated state as a report document.
    pub fn from_tracker(tracker: &CallTracker) -> Self {
        let mut stats: Vec<OperationStat> = tracker.stats().into_values().collect();
        stats.sort_by(|a, b| {
            b.total_time
                .partial_cmp(&a.total_time)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self {
            version: SCHEMA_VERSION.to_string(),
            stats,
            stacks: tracker.stacks(),
        }
    }
}
