//! Series builder
//!
//! Derives the time-ordered per-group series from a prefix of the record
//! sequence. Entries are keyed by exact timestamp inside an ordered map per
//! group, so find-or-create stays O(log n) and output is always sorted.
//! Replay grows the prefix every tick, and a linear rescan per record would
//! degrade badly over a long flight.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::log::Record;
use crate::registry::ChannelRegistry;

/// Timestamp key with a total order over f64.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TimeKey(f64);

impl Eq for TimeKey {}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One point in a group's series: a timestamp plus one field per channel
/// of that group populated at that timestamp.
///
/// Serializes flat, so the JSON shape is `{"time": 0.0, "AX": 1.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEntry {
    /// Timestamp shared by every channel value in this entry.
    pub time: f64,
    /// Channel values at this timestamp, keyed by channel name.
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl GroupEntry {
    /// Create an entry with no channel values yet.
    pub fn new(time: f64) -> Self {
        Self {
            time,
            values: BTreeMap::new(),
        }
    }

    /// Value of a channel at this timestamp, if populated.
    pub fn value(&self, channel: &str) -> Option<f64> {
        self.values.get(channel).copied()
    }
}

/// Per-group series derived from a record prefix.
pub type GroupSeries = BTreeMap<String, Vec<GroupEntry>>;

/// Incremental accumulator for per-group series.
///
/// Folding the same records in the same order always yields the same
/// series; the replay engine keeps one of these and folds each newly
/// visible record as the cursor advances.
#[derive(Debug, Clone, Default)]
pub struct SeriesBuilder {
    groups: BTreeMap<String, BTreeMap<TimeKey, GroupEntry>>,
}

impl SeriesBuilder {
    /// Create a builder with every configured group present and empty.
    pub fn new(registry: &ChannelRegistry) -> Self {
        let groups = registry
            .group_names()
            .map(|name| (name.to_string(), BTreeMap::new()))
            .collect();
        Self { groups }
    }

    /// Merge one record's registered channels into the series.
    ///
    /// For each registry-known channel carrying a numeric value, the entry
    /// at the record's exact timestamp is found or created in that
    /// channel's group and the channel field set on it. Duplicate
    /// timestamp/channel pairs across records resolve last-write-wins.
    /// Null cells, text cells and unregistered channels contribute nothing.
    pub fn fold(&mut self, registry: &ChannelRegistry, record: &Record) {
        for (channel, value) in &record.values {
            let Some(group) = registry.group_of(channel) else {
                continue;
            };
            let Some(number) = value.as_number() else {
                continue;
            };
            let entry = self
                .groups
                .entry(group.to_string())
                .or_default()
                .entry(TimeKey(record.time))
                .or_insert_with(|| GroupEntry::new(record.time));
            entry.values.insert(channel.clone(), number);
        }
    }

    /// Snapshot the accumulated series, sorted ascending by timestamp.
    pub fn series(&self) -> GroupSeries {
        self.groups
            .iter()
            .map(|(name, entries)| (name.clone(), entries.values().cloned().collect()))
            .collect()
    }

    /// Total number of entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }
}

/// Build the per-group series for the record prefix `[0, prefix_end]`.
///
/// Pure function of its inputs: the same prefix always yields a
/// structurally equal result. `prefix_end` is inclusive and clamps to the
/// end of the record sequence.
pub fn build_group_series(
    registry: &ChannelRegistry,
    records: &[Record],
    prefix_end: usize,
) -> GroupSeries {
    let mut builder = SeriesBuilder::new(registry);
    for record in records.iter().take(prefix_end.saturating_add(1)) {
        builder.fold(registry, record);
    }
    builder.series()
}
