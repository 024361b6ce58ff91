//! Flamegraph forest construction from captured call stacks.

mod builder;

pub use builder::{build_forest, FlameNode};
