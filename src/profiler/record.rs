//! Result records produced by the profiler.

use serde::{Deserialize, Serialize};

/// Accumulated cost of one group (the outer level of the execution tree,
/// e.g. a suite or batch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Caller-supplied identifier; opaque to the engine
    pub id: String,

    /// Seconds of event time observed between start and finish
    pub time: f64,

    /// Number of samples observed between start and finish
    pub count: u64,

    /// Unit boundaries observed inside this group, whether or not any
    /// sample occurred in them
    pub units: u64,
}

/// Accumulated cost of one unit (the inner level, e.g. a single task).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Caller-supplied identifier; opaque to the engine
    pub id: String,

    /// Seconds of event time observed between start and finish
    pub time: f64,

    /// Number of samples observed between start and finish
    pub count: u64,
}

/// A point-in-time view of a profiler's rankings. Reading it does not
/// mutate the profiler; repeated calls without new input are identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    /// Seconds of event time across the whole run
    pub total_time: f64,

    /// Samples across the whole run
    pub total_count: u64,

    /// Heaviest groups, heaviest first
    pub groups: Vec<GroupRecord>,

    /// Heaviest units, heaviest first; present only when per-unit
    /// tracking is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<Vec<UnitRecord>>,
}
