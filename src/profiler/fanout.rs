//! Broadcast of tree boundaries to a set of per-event profilers.

use std::collections::BTreeMap;

use log::debug;

use crate::profiler::record::ProfileSnapshot;
use crate::profiler::EventProfiler;
use crate::utils::config::ProfilerConfig;
use crate::utils::error::ConfigError;

/// Independent profilers for several named events, driven by one stream
/// of tree-boundary notifications.
///
/// Boundary calls are broadcast to every profiler. Samples are *not*
/// broadcast: the subscription layer routes each named event's samples
/// to its own profiler via [`ProfilerSet::profiler_mut`].
pub struct ProfilerSet {
    profilers: Vec<EventProfiler>,
}

impl ProfilerSet {
    /// Build one profiler per event name in `events`, a comma-delimited
    /// list such as `"sql.query,cache.read"`.
    ///
    /// # Errors
    /// * `ConfigError::EmptyEventList` - no non-empty names in the list
    /// * `ConfigError::ZeroCapacity` - `config.top_count` is 0
    pub fn from_events(events: &str, config: &ProfilerConfig) -> Result<Self, ConfigError> {
        let profilers = events
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| EventProfiler::new(name, config))
            .collect::<Result<Vec<_>, _>>()?;
        if profilers.is_empty() {
            return Err(ConfigError::EmptyEventList);
        }
        debug!("profiling {} events", profilers.len());
        Ok(Self { profilers })
    }

    /// The profiler dedicated to `event`, for sample routing.
    pub fn profiler_mut(&mut self, event: &str) -> Option<&mut EventProfiler> {
        self.profilers.iter_mut().find(|p| p.event() == event)
    }

    /// Names of the profiled events, in construction order.
    pub fn events(&self) -> Vec<&str> {
        self.profilers.iter().map(|p| p.event()).collect()
    }

    pub fn group_started(&mut self, id: &str) {
        for profiler in &mut self.profilers {
            profiler.group_started(id);
        }
    }

    pub fn group_finished(&mut self, id: &str) {
        for profiler in &mut self.profilers {
            profiler.group_finished(id);
        }
    }

    pub fn unit_started(&mut self, id: &str) {
        for profiler in &mut self.profilers {
            profiler.unit_started(id);
        }
    }

    pub fn unit_finished(&mut self, id: &str) {
        for profiler in &mut self.profilers {
            profiler.unit_finished(id);
        }
    }

    /// Snapshot of every profiler's rankings, keyed by event name.
    pub fn results(&self) -> BTreeMap<String, ProfileSnapshot> {
        self.profilers
            .iter()
            .map(|p| (p.event().to_string(), p.results()))
            .collect()
    }
}
