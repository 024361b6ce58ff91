//! Reentrancy-aware tracking of named operations.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Instant;

use log::debug;

use crate::tracker::OperationStat;
use crate::utils::config::{TrackerConfig, VARIATION_OVERFLOW_BUCKET};

/// Tracks nested invocations of named operations.
///
/// `track` takes `&self` so an operation body can call back into the same
/// tracker for nested operations; all state lives behind a `RefCell`.
/// That also makes the tracker `!Sync`, which matches its single-threaded
/// contract: boundaries and samples must arrive from one thread.
///
/// Bookkeeping is panic-safe: if a tracked body panics, elapsed time is
/// still recorded and the depth counter unwound before the panic
/// propagates to the caller.
pub struct CallTracker {
    config: TrackerConfig,
    state: RefCell<TrackerState>,
}

#[derive(Default)]
struct TrackerState {
    /// Current reentrancy depth; 0 means no tracked call is running
    depth: usize,
    /// Names pushed by the in-progress top-level invocation
    current_stack: Vec<String>,
    /// Completed call stacks, one per finished top-level invocation
    stacks: Vec<Vec<String>>,
    stats: BTreeMap<String, OperationStat>,
}

impl CallTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            state: RefCell::new(TrackerState::default()),
        }
    }

    /// Run `body` as an invocation of the operation `name`, returning its
    /// value. Counts and elapsed time are accumulated under `name`, and
    /// under `variations[variation]` when a variation key is given.
    pub fn track<T>(&self, name: &str, variation: Option<&str>, body: impl FnOnce() -> T) -> T {
        let variation = variation
            .filter(|v| !v.is_empty())
            .map(|v| self.bucket_variation(v));

        let top_level = {
            let mut state = self.state.borrow_mut();
            state.depth += 1;
            let top_level = state.depth == 1;
            if self.config.capture_stacks {
                state.current_stack.push(name.to_string());
            }
            let stat = state
                .stats
                .entry(name.to_string())
                .or_insert_with(|| OperationStat::new(name));
            stat.record_entry(top_level);
            if let Some(key) = variation.as_deref() {
                stat.variations
                    .entry(key.to_string())
                    .or_insert_with(|| OperationStat::new(key))
                    .record_entry(top_level);
            }
            top_level
        };

        // The guard finalizes timing on drop, so a panicking body still
        // leaves counters consistent before the panic unwinds past us.
        let _guard = TrackGuard {
            tracker: self,
            name,
            variation,
            top_level,
            started: Instant::now(),
        };
        body()
    }

    /// Accumulated stats by operation name.
    pub fn stats(&self) -> BTreeMap<String, OperationStat> {
        self.state.borrow().stats.clone()
    }

    /// Captured call stacks, one per completed top-level invocation.
    /// Empty unless `capture_stacks` is enabled.
    pub fn stacks(&self) -> Vec<Vec<String>> {
        self.state.borrow().stacks.clone()
    }

    /// Wholesale reset between runs: stats, stacks, and any in-progress
    /// buffer are discarded.
    pub fn reset(&self) {
        *self.state.borrow_mut() = TrackerState::default();
    }

    /// Collapse variation keys with too many distinct components into a
    /// single overflow bucket so the variations table stays bounded.
    /// Components are the alphanumeric runs of the key, so "[a,b,c]" has
    /// three components. Deliberately lossy.
    fn bucket_variation(&self, key: &str) -> String {
        let components = key
            .split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .count();
        if components > self.config.variations_limit {
            debug!(
                "variation key {:?} has {} components (limit {}), collapsing",
                key, components, self.config.variations_limit
            );
            VARIATION_OVERFLOW_BUCKET.to_string()
        } else {
            key.to_string()
        }
    }

    fn finish(&self, name: &str, variation: Option<&str>, top_level: bool, elapsed: f64) {
        let mut state = self.state.borrow_mut();

        if let Some(stat) = state.stats.get_mut(name) {
            stat.record_elapsed(elapsed, top_level);
            if let Some(key) = variation {
                if let Some(vstat) = stat.variations.get_mut(key) {
                    vstat.record_elapsed(elapsed, top_level);
                }
            }
        }

        state.depth = state.depth.saturating_sub(1);
        if state.depth == 0 && self.config.capture_stacks {
            let stack = std::mem::take(&mut state.current_stack);
            if !stack.is_empty() {
                state.stacks.push(stack);
            }
        }
    }
}

struct TrackGuard<'a> {
    tracker: &'a CallTracker,
    name: &'a str,
    variation: Option<String>,
    top_level: bool,
    started: Instant,
}

impl Drop for TrackGuard<'_> {
    fn drop(&mut self) {
        let elapsed = self.started.elapsed().as_secs_f64();
        self.tracker
            .finish(self.name, self.variation.as_deref(), self.top_level, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture_tracker() -> CallTracker {
        CallTracker::new(TrackerConfig {
            capture_stacks: true,
            variations_limit: 2,
        })
    }

    #[test]
    fn test_track_returns_body_value() {
        let tracker = CallTracker::new(TrackerConfig::default());
        let out = tracker.track("user", None, || 42);
        assert_eq!(out, 42);
    }

    #[test]
    fn test_variation_overflow_bucket() {
        let tracker = capture_tracker();
        tracker.track("user", Some("[admin,banned,verified]"), || ());
        let stats = tracker.stats();
        let user = &stats["user"];
        assert!(user.variations.contains_key(VARIATION_OVERFLOW_BUCKET));
        assert_eq!(user.variations.len(), 1);
    }

    #[test]
    fn test_empty_stack_not_captured() {
        let tracker = CallTracker::new(TrackerConfig {
            capture_stacks: false,
            ..TrackerConfig::default()
        });
        tracker.track("user", None, || ());
        assert!(tracker.stacks().is_empty());
    }
}
