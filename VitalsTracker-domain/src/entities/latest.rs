use std::collections::BTreeMap;

use super::reading::{MetricType, Reading};

/// Most recent reading per metric. Derived on demand, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatestByType {
    readings: BTreeMap<MetricType, Reading>,
}

impl LatestByType {
    /// Empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest reading for `metric`, if any
    pub fn get(&self, metric: MetricType) -> Option<&Reading> {
        self.readings.get(&metric)
    }

    /// Whether no metric has a reading
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Number of metrics with a reading
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Readings in metric order
    pub fn iter(&self) -> impl Iterator<Item = (MetricType, &Reading)> {
        self.readings.iter().map(|(metric, reading)| (*metric, reading))
    }

    /// Record `reading` as the latest of its metric, replacing any previous one
    pub fn insert(&mut self, reading: Reading) {
        self.readings.insert(reading.metric_type(), reading);
    }
}
