//! Nested-call accounting for named operations.
//!
//! Tracks reentrant invocations of named operations (e.g. "build user"),
//! distinguishing top-level calls from nested ones, and optionally
//! captures the call stack of every completed top-level invocation for
//! flamegraph construction.

mod nested;
mod stat;

pub use nested::CallTracker;
pub use stat::OperationStat;
