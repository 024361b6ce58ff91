//! Configuration structs and constants.
//!
//! All configuration is explicit: each component takes its config at
//! construction. There is no process-wide mutable configuration object.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::error::ConfigError;

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Bucket name used when a variation key exceeds the component limit
pub const VARIATION_OVERFLOW_BUCKET: &str = "too many variations";

/// The field used to rank and bound entries in a top-K set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMetric {
    /// Rank by accumulated event time
    Time,
    /// Rank by number of events
    Count,
}

impl fmt::Display for RankMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankMetric::Time => write!(f, "time"),
            RankMetric::Count => write!(f, "count"),
        }
    }
}

impl FromStr for RankMetric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(RankMetric::Time),
            "count" => Ok(RankMetric::Count),
            other => Err(ConfigError::UnknownRankMetric(other.to_string())),
        }
    }
}

/// Configuration for an [`EventProfiler`](crate::profiler::EventProfiler).
#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    /// Field used to order groups/units
    pub rank_by: RankMetric,

    /// How many groups (and units, when enabled) to retain
    pub top_count: usize,

    /// Track per-unit records in addition to per-group records
    pub per_unit: bool,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            rank_by: RankMetric::Time,
            top_count: 5,
            per_unit: false,
        }
    }
}

/// Configuration for a [`CallTracker`](crate::tracker::CallTracker).
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Record the call stack of each completed top-level invocation
    pub capture_stacks: bool,

    /// Maximum number of distinct components a variation key may carry
    /// before it is collapsed into [`VARIATION_OVERFLOW_BUCKET`]
    pub variations_limit: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            capture_stacks: false,
            variations_limit: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_metric_from_str() {
        assert_eq!("time".parse::<RankMetric>().unwrap(), RankMetric::Time);
        assert_eq!(" Count ".parse::<RankMetric>().unwrap(), RankMetric::Count);
        assert!("gas".parse::<RankMetric>().is_err());
    }

    #[test]
    fn test_rank_metric_display() {
        assert_eq!(RankMetric::Time.to_string(), "time");
        assert_eq!(RankMetric::Count.to_string(), "count");
    }
}
