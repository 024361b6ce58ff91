//! Hierarchical event profiling.
//!
//! An [`EventProfiler`] accounts one named event's samples against the
//! two-level group/unit execution tree of a host runner; a
//! [`ProfilerSet`] fans tree-boundary notifications out to several
//! profilers for multi-event runs.

mod event;
mod fanout;
mod record;

pub use event::EventProfiler;
pub use fanout::ProfilerSet;
pub use record::{GroupRecord, ProfileSnapshot, UnitRecord};
