//! taskprof
//!
//! Bounded top-K aggregation and nested-call accounting for
//! hierarchical task runners.
//!
//! A host runner (test framework, batch executor) reports a two-level
//! execution tree - groups containing units - plus timed samples for
//! named events. This crate answers "which groups and units were
//! heaviest, and what was the call structure of recursive work performed
//! inside them?" without storing unbounded history:
//!
//! - [`topk::TopK`] retains only the K heaviest records ever offered.
//! - [`profiler::EventProfiler`] accounts one event's samples against
//!   group/unit boundaries; [`profiler::ProfilerSet`] fans boundaries
//!   out for multi-event runs.
//! - [`tracker::CallTracker`] accounts reentrant named operations,
//!   separating top-level from nested cost and capturing call stacks.
//! - [`flame::build_forest`] merges captured stacks into a flamegraph
//!   forest.
//! - [`report`] packages results as versioned JSON documents.
//!
//! How samples are captured and how reports are rendered are consumer
//! concerns; the engine is a pure, single-threaded accounting layer.

pub mod flame;
pub mod profiler;
pub mod report;
pub mod topk;
pub mod tracker;
pub mod utils;

pub use flame::{build_forest, FlameNode};
pub use profiler::{EventProfiler, GroupRecord, ProfileSnapshot, ProfilerSet, UnitRecord};
pub use report::{EventProfileReport, TrackerReport};
pub use topk::TopK;
pub use tracker::{CallTracker, OperationStat};
pub use utils::config::{ProfilerConfig, RankMetric, TrackerConfig};
pub use utils::error::{ConfigError, ReportError};
