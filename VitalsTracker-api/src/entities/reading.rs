use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use vitals_tracker_domain::entities::{Dashboard, Measurement, MetricSummary, MetricType, Reading, StatusLabel};
use vitals_tracker_domain::services::classify;

/// Public representation of a stored reading
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicReading {
    /// Metric recorded
    #[serde(rename = "type")]
    pub reading_type: MetricType,

    /// When the reading was recorded
    pub timestamp: DateTime<Utc>,

    /// Systolic pressure, blood pressure only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub systolic: Option<i32>,

    /// Diastolic pressure, blood pressure only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<i32>,

    /// Measured value for the other metrics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Optional notes about the reading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Value with unit, e.g. `120/80 mmHg`
    pub display: String,

    /// History line, e.g. `Heart Rate: 72 bpm`
    pub summary: String,

    /// Classification of the value
    pub status: StatusLabel,
}

impl From<&Reading> for PublicReading {
    fn from(reading: &Reading) -> Self {
        let measurement = reading.measurement();
        let (systolic, diastolic) = match *measurement {
            Measurement::BloodPressure { systolic, diastolic } => (Some(systolic), Some(diastolic)),
            _ => (None, None),
        };

        Self {
            reading_type: reading.metric_type(),
            timestamp: reading.timestamp(),
            systolic,
            diastolic,
            value: measurement.value(),
            notes: reading.notes().map(str::to_string),
            display: measurement.display_value(),
            summary: measurement.describe(),
            status: classify(measurement),
        }
    }
}

/// Result of classifying a payload without storing it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassifyResponse {
    /// Metric classified
    #[serde(rename = "type")]
    pub reading_type: MetricType,

    /// Classification of the submitted value
    pub status: StatusLabel,
}

/// Dashboard card for one metric
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricCard {
    /// Metric shown on the card
    #[serde(rename = "type")]
    pub reading_type: MetricType,

    /// Human-readable metric name
    pub label: String,

    /// Latest value with unit, or a placeholder
    pub display: String,

    /// Status of the latest reading, `N/A` without one
    pub status: StatusLabel,

    /// Latest reading, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<PublicReading>,
}

impl From<&MetricSummary> for MetricCard {
    fn from(summary: &MetricSummary) -> Self {
        Self {
            reading_type: summary.metric,
            label: summary.metric.label().to_string(),
            display: summary.display.clone(),
            status: summary.status,
            latest: summary.reading.as_ref().map(PublicReading::from),
        }
    }
}

/// Dashboard payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    /// One card per metric, blood pressure first
    pub metrics: Vec<MetricCard>,

    /// Advisory messages
    pub insights: Vec<String>,

    /// Stored records left out because they could not be read
    pub skipped_records: usize,
}

impl From<&Dashboard> for DashboardResponse {
    fn from(dashboard: &Dashboard) -> Self {
        Self {
            metrics: dashboard.metrics.iter().map(MetricCard::from).collect(),
            insights: dashboard.insights.clone(),
            skipped_records: dashboard.skipped_records,
        }
    }
}

/// Insight list payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsightsResponse {
    /// Advisory messages, or a single sentinel message
    pub insights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_public_reading_shape() {
        let timestamp = Utc.timestamp_opt(1_714_552_200, 0).unwrap();
        let reading = Reading::new(
            Measurement::BloodPressure { systolic: 135, diastolic: 79 },
            timestamp,
            Some("morning".to_string()),
        )
        .unwrap();

        let json = serde_json::to_value(PublicReading::from(&reading)).unwrap();
        assert_eq!(json["type"], "bloodPressure");
        assert_eq!(json["systolic"], 135);
        assert_eq!(json["display"], "135/79 mmHg");
        assert_eq!(json["summary"], "Blood Pressure: 135/79 mmHg");
        assert_eq!(json["status"], "High Blood Pressure (Stage 1)");
        assert!(json.get("value").is_none());
    }

    #[test]
    fn test_heart_rate_card() {
        let summary = MetricSummary {
            metric: MetricType::HeartRate,
            display: "-- bpm".to_string(),
            status: StatusLabel::NotAvailable,
            reading: None,
        };

        let json = serde_json::to_value(MetricCard::from(&summary)).unwrap();
        assert_eq!(json["label"], "Heart Rate");
        assert_eq!(json["status"], "N/A");
        assert!(json.get("latest").is_none());
    }
}
