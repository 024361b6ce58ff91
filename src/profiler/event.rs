//! Single-event hierarchical profiler.

use log::{debug, warn};

use crate::profiler::record::{GroupRecord, ProfileSnapshot, UnitRecord};
use crate::topk::TopK;
use crate::utils::config::{ProfilerConfig, RankMetric};
use crate::utils::error::ConfigError;

/// Accounts one named event's samples against group/unit boundaries.
///
/// State moves `idle -> in group -> in group+unit -> in group -> idle`
/// as the host runner reports boundaries. At most one group, and within
/// it at most one unit, is open at a time; this type does not support
/// concurrent groups.
///
/// Boundary calls are forgiving of host misbehavior: a `group_started`
/// while a group is open replaces it, and a `*_finished` with nothing
/// open is a no-op. Samples arriving while no group is open are dropped.
pub struct EventProfiler {
    event: String,
    rank_by: RankMetric,
    per_unit: bool,

    groups: TopK<GroupRecord>,
    units: Option<TopK<UnitRecord>>,

    current_group: Option<OpenScope>,
    current_unit: Option<OpenScope>,

    total_time: f64,
    total_count: u64,
}

/// Counters accumulated since a `*_started` boundary.
struct OpenScope {
    id: String,
    time: f64,
    count: u64,
    units: u64,
}

impl OpenScope {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            time: 0.0,
            count: 0,
            units: 0,
        }
    }
}

fn group_by_time(a: &GroupRecord, b: &GroupRecord) -> bool {
    a.time >= b.time
}

fn group_by_count(a: &GroupRecord, b: &GroupRecord) -> bool {
    a.count >= b.count
}

fn unit_by_time(a: &UnitRecord, b: &UnitRecord) -> bool {
    a.time >= b.time
}

fn unit_by_count(a: &UnitRecord, b: &UnitRecord) -> bool {
    a.count >= b.count
}

impl EventProfiler {
    /// Create a profiler for the event named `event`.
    ///
    /// # Errors
    /// * `ConfigError::ZeroCapacity` - `config.top_count` is 0
    pub fn new(event: &str, config: &ProfilerConfig) -> Result<Self, ConfigError> {
        let groups = match config.rank_by {
            RankMetric::Time => TopK::new(config.top_count, group_by_time),
            RankMetric::Count => TopK::new(config.top_count, group_by_count),
        }?;
        let units = if config.per_unit {
            Some(match config.rank_by {
                RankMetric::Time => TopK::new(config.top_count, unit_by_time),
                RankMetric::Count => TopK::new(config.top_count, unit_by_count),
            }?)
        } else {
            None
        };

        debug!(
            "profiling event {:?} (rank by {}, top {}, per-unit: {})",
            event, config.rank_by, config.top_count, config.per_unit
        );

        Ok(Self {
            event: event.to_string(),
            rank_by: config.rank_by,
            per_unit: config.per_unit,
            groups,
            units,
            current_group: None,
            current_unit: None,
            total_time: 0.0,
            total_count: 0,
        })
    }

    /// Name of the event this profiler accounts.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Field the rankings are ordered by.
    pub fn rank_by(&self) -> RankMetric {
        self.rank_by
    }

    /// Open a group, resetting group-scoped counters. An already-open
    /// group is replaced, not an error.
    pub fn group_started(&mut self, id: &str) {
        if let Some(open) = &self.current_group {
            warn!(
                "group {:?} started while {:?} is open; replacing",
                id, open.id
            );
        }
        self.current_group = Some(OpenScope::new(id));
        self.current_unit = None;
    }

    /// Close the open group and offer its record to the ranking.
    /// No-op when no group is open.
    pub fn group_finished(&mut self, id: &str) {
        let Some(open) = self.current_group.take() else {
            debug!("group {:?} finished with no open group; ignoring", id);
            return;
        };
        if open.id != id {
            warn!(
                "group {:?} finished while {:?} is open; closing {:?}",
                id, open.id, open.id
            );
        }
        self.current_unit = None;

        let record = GroupRecord {
            id: open.id,
            time: open.time,
            count: open.count,
            units: open.units,
        };
        if self.group_metric_is_zero(&record) {
            debug!("dropping group {:?}: ranked metric is zero", record.id);
            return;
        }
        self.groups.insert(record);
    }

    /// Open a unit inside the current group. Only meaningful when
    /// per-unit tracking is enabled.
    pub fn unit_started(&mut self, id: &str) {
        if !self.per_unit {
            return;
        }
        self.current_unit = Some(OpenScope::new(id));
    }

    /// Close the open unit. The enclosing group's unit counter is
    /// incremented even when per-unit tracking is off, so group reports
    /// can still say "N units ran".
    pub fn unit_finished(&mut self, id: &str) {
        if let Some(group) = &mut self.current_group {
            group.units += 1;
        }
        if !self.per_unit {
            return;
        }
        let Some(open) = self.current_unit.take() else {
            debug!("unit {:?} finished with no open unit; ignoring", id);
            return;
        };
        if open.id != id {
            warn!(
                "unit {:?} finished while {:?} is open; closing {:?}",
                id, open.id, open.id
            );
        }

        let record = UnitRecord {
            id: open.id,
            time: open.time,
            count: open.count,
        };
        if self.unit_metric_is_zero(&record) {
            return;
        }
        if let Some(units) = &mut self.units {
            units.insert(record);
        }
    }

    /// Account one sample of `duration` seconds against the open group
    /// (and open unit, if any). Dropped when no group is open.
    pub fn sample(&mut self, duration: f64) {
        let Some(group) = &mut self.current_group else {
            return;
        };
        group.time += duration;
        group.count += 1;
        self.total_time += duration;
        self.total_count += 1;

        if let Some(unit) = &mut self.current_unit {
            unit.time += duration;
            unit.count += 1;
        }
    }

    /// Current rankings and run totals. Pure read.
    pub fn results(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            total_time: self.total_time,
            total_count: self.total_count,
            groups: self.groups.to_vec(),
            units: self.units.as_ref().map(|set| set.to_vec()),
        }
    }

    fn group_metric_is_zero(&self, record: &GroupRecord) -> bool {
        match self.rank_by {
            RankMetric::Time => record.time == 0.0,
            RankMetric::Count => record.count == 0,
        }
    }

    fn unit_metric_is_zero(&self, record: &UnitRecord) -> bool {
        match self.rank_by {
            RankMetric::Time => record.time == 0.0,
            RankMetric::Count => record.count == 0,
        }
    }
}
