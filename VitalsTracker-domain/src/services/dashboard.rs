use crate::entities::dashboard::{Dashboard, MetricSummary};
use crate::entities::latest::LatestByType;
use crate::entities::reading::MetricType;
use crate::entities::status::StatusLabel;
use crate::services::classifier::classify;
use crate::services::insights::generate_insights;

/// Summarize one metric from its latest reading
pub fn summarize_metric(latest: &LatestByType, metric: MetricType) -> MetricSummary {
    match latest.get(metric) {
        Some(reading) => MetricSummary {
            metric,
            display: reading.measurement().display_value(),
            status: classify(reading.measurement()),
            reading: Some(reading.clone()),
        },
        None => MetricSummary {
            metric,
            display: metric.placeholder(),
            status: StatusLabel::NotAvailable,
            reading: None,
        },
    }
}

/// Dashboard for every metric in fixed order, with the current insights
pub fn build_dashboard(latest: &LatestByType) -> Dashboard {
    Dashboard {
        metrics: MetricType::ALL
            .iter()
            .map(|metric| summarize_metric(latest, *metric))
            .collect(),
        insights: generate_insights(latest),
        skipped_records: 0,
    }
}
