use super::reading::{MetricType, Reading};
use super::status::StatusLabel;

/// Latest state of one metric as the dashboard shows it
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    /// Metric summarized
    pub metric: MetricType,
    /// Value with unit, or a placeholder when there is no reading
    pub display: String,
    /// Status of the latest reading, `N/A` when there is none
    pub status: StatusLabel,
    /// The latest reading itself
    pub reading: Option<Reading>,
}

/// Dashboard projection: every metric in fixed order plus the insights
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// One summary per metric, blood pressure first
    pub metrics: Vec<MetricSummary>,
    /// Advisory messages, or a single sentinel message
    pub insights: Vec<String>,
    /// Stored records left out because they could not be read
    pub skipped_records: usize,
}
