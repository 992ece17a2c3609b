use chrono::{DateTime, SecondsFormat, Utc};
use vitals_tracker_data::models::reading::{StoredReading, StoredReadingType};

use crate::entities::reading::{Measurement, MetricType, Reading};

// Conversion functions between domain entities and data models
// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Format a timestamp for storage.
///
/// Fractional seconds are written with as many digits as needed, so parsing
/// the string back yields the identical instant.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse a stored RFC 3339 timestamp into UTC
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("Invalid timestamp '{}': {}", raw, e))
}

/// Convert from domain metric to data discriminant
pub fn convert_to_data_type(metric: MetricType) -> StoredReadingType {
    match metric {
        MetricType::BloodPressure => StoredReadingType::BloodPressure,
        MetricType::HeartRate => StoredReadingType::HeartRate,
        MetricType::BloodSugar => StoredReadingType::BloodSugar,
        MetricType::Temperature => StoredReadingType::Temperature,
    }
}

/// Convert from data discriminant to domain metric
pub fn convert_to_domain_type(reading_type: StoredReadingType) -> MetricType {
    match reading_type {
        StoredReadingType::BloodPressure => MetricType::BloodPressure,
        StoredReadingType::HeartRate => MetricType::HeartRate,
        StoredReadingType::BloodSugar => MetricType::BloodSugar,
        StoredReadingType::Temperature => MetricType::Temperature,
    }
}

/// Convert from domain entity to data model
pub fn convert_to_data_reading(reading: &Reading) -> StoredReading {
    let (systolic, diastolic) = match *reading.measurement() {
        Measurement::BloodPressure { systolic, diastolic } => (Some(systolic), Some(diastolic)),
        _ => (None, None),
    };

    StoredReading {
        reading_type: convert_to_data_type(reading.metric_type()),
        timestamp: format_timestamp(&reading.timestamp()),
        notes: reading.notes().map(str::to_string),
        systolic,
        diastolic,
        value: reading.measurement().value(),
    }
}

/// Convert from data model to domain entity.
///
/// Fails when the stored record lacks the payload its type requires or its
/// timestamp cannot be parsed.
pub fn convert_to_domain_reading(stored: StoredReading) -> Result<Reading, String> {
    let metric = convert_to_domain_type(stored.reading_type);
    let timestamp = parse_timestamp(&stored.timestamp)?;

    let measurement = match metric {
        MetricType::BloodPressure => match (stored.systolic, stored.diastolic) {
            (Some(systolic), Some(diastolic)) => Measurement::BloodPressure { systolic, diastolic },
            _ => {
                return Err(format!(
                    "Blood pressure reading at {} is missing systolic or diastolic",
                    stored.timestamp
                ))
            }
        },
        metric => {
            let value = stored
                .value
                .ok_or_else(|| format!("{} reading at {} has no value", metric.label(), stored.timestamp))?;
            Measurement::single_value(metric, value).map_err(|e| e.to_string())?
        }
    };

    Reading::new(measurement, timestamp, stored.notes).map_err(|e| e.to_string())
}
