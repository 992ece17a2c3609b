use crate::entities::latest::LatestByType;
use crate::entities::reading::{format_one_decimal, Measurement, MetricType};
use crate::entities::status::StatusLabel;
use crate::services::classifier::classify;

/// Returned when there are no readings at all
pub const NO_INSIGHTS_MESSAGE: &str = "No insights yet.";

/// Returned when every latest reading is unremarkable
pub const ALL_NORMAL_MESSAGE: &str = "All recent readings appear normal.";

/// Advisory messages for the latest reading of each metric, in metric order
pub fn generate_insights(latest: &LatestByType) -> Vec<String> {
    if latest.is_empty() {
        return vec![NO_INSIGHTS_MESSAGE.to_string()];
    }

    let insights: Vec<String> = MetricType::ALL
        .iter()
        .filter_map(|metric| latest.get(*metric))
        .map(|reading| (reading.measurement(), classify(reading.measurement())))
        .filter(|(_, status)| status.is_notable())
        .filter_map(|(measurement, status)| insight_for(measurement, status))
        .collect();

    if insights.is_empty() {
        vec![ALL_NORMAL_MESSAGE.to_string()]
    } else {
        insights
    }
}

fn insight_for(measurement: &Measurement, status: StatusLabel) -> Option<String> {
    match (*measurement, status) {
        (
            Measurement::BloodPressure { .. },
            StatusLabel::HighBloodPressureStage1 | StatusLabel::HighBloodPressureStage2,
        ) => Some(format!(
            "Your blood pressure is {}. Consider lifestyle changes or consult a doctor.",
            status
        )),
        (Measurement::BloodPressure { .. }, StatusLabel::Elevated) => Some(
            "Your blood pressure is Elevated. Focus on a healthy diet and regular exercise.".to_string(),
        ),
        (Measurement::BloodPressure { .. }, StatusLabel::Low) => Some(
            "Your blood pressure is Low. Ensure adequate hydration and consult a doctor if you experience symptoms."
                .to_string(),
        ),
        (Measurement::HeartRate { bpm }, StatusLabel::High) => Some(format!(
            "Your heart rate is High ({} bpm). If persistent, consult a healthcare professional.",
            bpm
        )),
        (Measurement::HeartRate { bpm }, StatusLabel::Low) => Some(format!(
            "Your heart rate is Low ({} bpm). This could be normal for athletes, but consult a doctor if you have symptoms.",
            bpm
        )),
        (Measurement::BloodSugar { .. }, StatusLabel::High | StatusLabel::PreDiabetic) => Some(format!(
            "Your blood sugar is {}. Monitor your diet and consider medical advice.",
            status
        )),
        (Measurement::BloodSugar { .. }, StatusLabel::Low) => Some(
            "Your blood sugar is Low. Ensure regular meals and consult a doctor if you feel symptoms of hypoglycemia."
                .to_string(),
        ),
        (Measurement::Temperature { celsius }, StatusLabel::High) => Some(format!(
            "Your temperature is High ({}°C), indicating a fever. Rest and consult a doctor if needed.",
            format_one_decimal(celsius)
        )),
        (Measurement::Temperature { celsius }, StatusLabel::Low) => Some(format!(
            "Your temperature is Low ({}°C). If you feel unwell, seek medical advice.",
            format_one_decimal(celsius)
        )),
        _ => None,
    }
}
