use serde::{Deserialize, Serialize};

/// Discriminant written into the `type` field of a stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StoredReadingType {
    BloodPressure,
    HeartRate,
    BloodSugar,
    Temperature,
}

/// Storage model for a single reading.
///
/// The shape is flat on purpose: blood pressure records carry `systolic` and
/// `diastolic`, every other type carries `value`. Absent fields are omitted
/// when serialized so that existing browser-era arrays load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReading {
    /// Metric this reading belongs to
    #[serde(rename = "type")]
    pub reading_type: StoredReadingType,

    /// RFC 3339 timestamp in UTC
    pub timestamp: String,

    /// Optional notes about the reading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Systolic pressure, blood pressure records only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systolic: Option<i32>,

    /// Diastolic pressure, blood pressure records only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<i32>,

    /// Measured value for single-value metrics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}
