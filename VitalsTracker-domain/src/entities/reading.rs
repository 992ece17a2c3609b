use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::errors::ValidationError;

/// Vital-sign metric tracked by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub enum MetricType {
    /// Systolic over diastolic pressure, mmHg
    BloodPressure,
    /// Resting pulse, beats per minute
    HeartRate,
    /// Fasting blood glucose, mg/dL
    BloodSugar,
    /// Body temperature, degrees Celsius
    Temperature,
}

impl MetricType {
    /// Every metric, in dashboard and insight order
    pub const ALL: [MetricType; 4] = [
        MetricType::BloodPressure,
        MetricType::HeartRate,
        MetricType::BloodSugar,
        MetricType::Temperature,
    ];

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            MetricType::BloodPressure => "Blood Pressure",
            MetricType::HeartRate => "Heart Rate",
            MetricType::BloodSugar => "Blood Sugar",
            MetricType::Temperature => "Temperature",
        }
    }

    /// Unit the metric is recorded in
    pub fn unit(self) -> &'static str {
        match self {
            MetricType::BloodPressure => "mmHg",
            MetricType::HeartRate => "bpm",
            MetricType::BloodSugar => "mg/dL",
            MetricType::Temperature => "°C",
        }
    }

    /// Display text shown when no reading of this metric exists
    pub fn placeholder(self) -> String {
        match self {
            MetricType::BloodPressure => format!("--/-- {}", self.unit()),
            _ => format!("-- {}", self.unit()),
        }
    }
}

/// Format with one decimal place, halves rounded away from zero.
///
/// `{:.1}` alone rounds an exact half to even, so 38.25 would print as 38.2.
pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// Measured payload of a reading. The variant fixes the metric type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    BloodPressure { systolic: i32, diastolic: i32 },
    HeartRate { bpm: f64 },
    BloodSugar { mg_dl: f64 },
    Temperature { celsius: f64 },
}

impl Measurement {
    /// Build a single-value measurement for `metric`.
    ///
    /// Blood pressure needs two values and is rejected here.
    pub fn single_value(metric: MetricType, value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite("value"));
        }
        match metric {
            MetricType::HeartRate => Ok(Measurement::HeartRate { bpm: value }),
            MetricType::BloodSugar => Ok(Measurement::BloodSugar { mg_dl: value }),
            MetricType::Temperature => Ok(Measurement::Temperature { celsius: value }),
            MetricType::BloodPressure => Err(ValidationError::MissingField("systolic")),
        }
    }

    /// Metric this measurement belongs to
    pub fn metric_type(&self) -> MetricType {
        match self {
            Measurement::BloodPressure { .. } => MetricType::BloodPressure,
            Measurement::HeartRate { .. } => MetricType::HeartRate,
            Measurement::BloodSugar { .. } => MetricType::BloodSugar,
            Measurement::Temperature { .. } => MetricType::Temperature,
        }
    }

    /// Single value for the one-value metrics, `None` for blood pressure
    pub fn value(&self) -> Option<f64> {
        match *self {
            Measurement::BloodPressure { .. } => None,
            Measurement::HeartRate { bpm } => Some(bpm),
            Measurement::BloodSugar { mg_dl } => Some(mg_dl),
            Measurement::Temperature { celsius } => Some(celsius),
        }
    }

    /// Value with its unit, e.g. `120/80 mmHg` or `36.6 °C`
    pub fn display_value(&self) -> String {
        let unit = self.metric_type().unit();
        match *self {
            Measurement::BloodPressure { systolic, diastolic } => format!("{}/{} {}", systolic, diastolic, unit),
            Measurement::Temperature { celsius } => format!("{} {}", format_one_decimal(celsius), unit),
            Measurement::HeartRate { bpm: value } | Measurement::BloodSugar { mg_dl: value } => {
                format!("{} {}", value, unit)
            }
        }
    }

    /// History line, e.g. `Heart Rate: 72 bpm`
    pub fn describe(&self) -> String {
        format!("{}: {}", self.metric_type().label(), self.display_value())
    }

    fn check_finite(&self) -> Result<(), ValidationError> {
        match self.value() {
            Some(value) if !value.is_finite() => Err(ValidationError::NotFinite("value")),
            _ => Ok(()),
        }
    }
}

/// One recorded measurement event. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    timestamp: DateTime<Utc>,
    notes: Option<String>,
    measurement: Measurement,
}

impl Reading {
    /// Create a reading, rejecting non-finite values
    pub fn new(
        measurement: Measurement,
        timestamp: DateTime<Utc>,
        notes: Option<String>,
    ) -> Result<Self, ValidationError> {
        measurement.check_finite()?;
        Ok(Self {
            timestamp,
            notes,
            measurement,
        })
    }

    /// Metric this reading belongs to
    pub fn metric_type(&self) -> MetricType {
        self.measurement.metric_type()
    }

    /// When the reading was recorded
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Free-text notes, if any
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Measured payload
    pub fn measurement(&self) -> &Measurement {
        &self.measurement
    }
}
