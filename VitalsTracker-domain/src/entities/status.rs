use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Classification of a reading against its reference ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum StatusLabel {
    Low,
    Normal,
    Elevated,
    #[serde(rename = "High Blood Pressure (Stage 1)")]
    HighBloodPressureStage1,
    #[serde(rename = "High Blood Pressure (Stage 2)")]
    HighBloodPressureStage2,
    #[serde(rename = "Hypertensive Crisis")]
    HypertensiveCrisis,
    #[serde(rename = "Pre-diabetic")]
    PreDiabetic,
    High,
    /// Outside every declared range, or no data
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl StatusLabel {
    /// Exact text shown to the user
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Low => "Low",
            StatusLabel::Normal => "Normal",
            StatusLabel::Elevated => "Elevated",
            StatusLabel::HighBloodPressureStage1 => "High Blood Pressure (Stage 1)",
            StatusLabel::HighBloodPressureStage2 => "High Blood Pressure (Stage 2)",
            StatusLabel::HypertensiveCrisis => "Hypertensive Crisis",
            StatusLabel::PreDiabetic => "Pre-diabetic",
            StatusLabel::High => "High",
            StatusLabel::NotAvailable => "N/A",
        }
    }

    /// Whether the status deserves an insight
    pub fn is_notable(&self) -> bool {
        !matches!(self, StatusLabel::Normal | StatusLabel::NotAvailable)
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
