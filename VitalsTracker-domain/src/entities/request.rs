use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::errors::ValidationError;
use super::reading::{Measurement, MetricType};

/// Raw numeric field as submitted: a JSON number or the text of a form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Read the input as a whole number
    pub fn to_integer(&self, field: &'static str) -> Result<i32, ValidationError> {
        match self {
            NumericInput::Number(n) => {
                if !n.is_finite() {
                    return Err(ValidationError::NotFinite(field));
                }
                if n.fract() != 0.0 || *n < i32::MIN as f64 || *n > i32::MAX as f64 {
                    return Err(ValidationError::NotAnInteger {
                        field,
                        input: n.to_string(),
                    });
                }
                Ok(*n as i32)
            }
            NumericInput::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::MissingField(field));
                }
                trimmed.parse().map_err(|_| ValidationError::NotAnInteger {
                    field,
                    input: text.clone(),
                })
            }
        }
    }

    /// Read the input as a finite number
    pub fn to_number(&self, field: &'static str) -> Result<f64, ValidationError> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::MissingField(field));
                }
                trimmed.parse::<f64>().map_err(|_| ValidationError::NotANumber {
                    field,
                    input: text.clone(),
                })?
            }
        };

        if !value.is_finite() {
            return Err(ValidationError::NotFinite(field));
        }
        Ok(value)
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<i32> for NumericInput {
    fn from(value: i32) -> Self {
        NumericInput::Number(value as f64)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Request payload for recording (or classifying) a reading
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct CreateReadingRequest {
    /// Metric being recorded
    #[serde(rename = "type")]
    pub reading_type: MetricType,

    /// Systolic pressure, required for blood pressure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systolic: Option<NumericInput>,

    /// Diastolic pressure, required for blood pressure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<NumericInput>,

    /// Measured value, required for every other metric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<NumericInput>,

    /// Optional notes about the reading
    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateReadingRequest {
    /// Blood pressure request
    pub fn blood_pressure(systolic: impl Into<NumericInput>, diastolic: impl Into<NumericInput>) -> Self {
        Self {
            reading_type: MetricType::BloodPressure,
            systolic: Some(systolic.into()),
            diastolic: Some(diastolic.into()),
            value: None,
            notes: None,
        }
    }

    /// Request for one of the single-value metrics
    pub fn single_value(metric: MetricType, value: impl Into<NumericInput>) -> Self {
        Self {
            reading_type: metric,
            systolic: None,
            diastolic: None,
            value: Some(value.into()),
            notes: None,
        }
    }

    /// Attach notes to the request
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Parse the fields relevant to `reading_type` into a measurement.
    ///
    /// Fields that do not belong to the metric are ignored.
    pub fn parse_measurement(&self) -> Result<Measurement, ValidationError> {
        match self.reading_type {
            MetricType::BloodPressure => {
                let systolic = self
                    .systolic
                    .as_ref()
                    .ok_or(ValidationError::MissingField("systolic"))?
                    .to_integer("systolic")?;
                let diastolic = self
                    .diastolic
                    .as_ref()
                    .ok_or(ValidationError::MissingField("diastolic"))?
                    .to_integer("diastolic")?;
                Ok(Measurement::BloodPressure { systolic, diastolic })
            }
            metric => {
                let value = self
                    .value
                    .as_ref()
                    .ok_or(ValidationError::MissingField("value"))?
                    .to_number("value")?;
                Measurement::single_value(metric, value)
            }
        }
    }

    /// Notes as they should be stored: trimmed-empty notes become absent
    pub fn normalized_notes(&self) -> Option<String> {
        self.notes
            .as_ref()
            .filter(|notes| !notes.trim().is_empty())
            .cloned()
    }
}
