use crate::entities::reading::Measurement;
use crate::entities::status::StatusLabel;

/// Categorize blood pressure. Rules are checked in order and the first match wins.
pub fn classify_blood_pressure(systolic: i32, diastolic: i32) -> StatusLabel {
    if systolic < 90 || diastolic < 60 {
        StatusLabel::Low
    } else if systolic <= 120 && diastolic <= 80 {
        StatusLabel::Normal
    } else if systolic > 120 && systolic <= 129 && diastolic <= 80 {
        StatusLabel::Elevated
    } else if (130..=139).contains(&systolic) || (80..=89).contains(&diastolic) {
        StatusLabel::HighBloodPressureStage1
    } else if systolic >= 140 || diastolic >= 90 {
        StatusLabel::HighBloodPressureStage2
    } else if systolic > 180 || diastolic > 120 {
        // Never reached: the stage 2 rule above already matches these values
        StatusLabel::HypertensiveCrisis
    } else {
        StatusLabel::NotAvailable
    }
}

/// Categorize resting heart rate in beats per minute
pub fn classify_heart_rate(bpm: f64) -> StatusLabel {
    if bpm < 60.0 {
        StatusLabel::Low
    } else if (60.0..=100.0).contains(&bpm) {
        StatusLabel::Normal
    } else if bpm > 100.0 {
        StatusLabel::High
    } else {
        StatusLabel::NotAvailable
    }
}

/// Categorize fasting blood sugar in mg/dL.
///
/// Values between the integer bands (99.5, 125.5) fall through to `N/A`.
pub fn classify_blood_sugar(mg_dl: f64) -> StatusLabel {
    if mg_dl < 70.0 {
        StatusLabel::Low
    } else if (70.0..=99.0).contains(&mg_dl) {
        StatusLabel::Normal
    } else if (100.0..=125.0).contains(&mg_dl) {
        StatusLabel::PreDiabetic
    } else if mg_dl >= 126.0 {
        StatusLabel::High
    } else {
        StatusLabel::NotAvailable
    }
}

/// Categorize body temperature in degrees Celsius
pub fn classify_temperature(celsius: f64) -> StatusLabel {
    if celsius < 35.0 {
        StatusLabel::Low
    } else if (35.0..=37.5).contains(&celsius) {
        StatusLabel::Normal
    } else if celsius > 37.5 {
        StatusLabel::High
    } else {
        StatusLabel::NotAvailable
    }
}

/// Classify any measurement with the rules of its metric
pub fn classify(measurement: &Measurement) -> StatusLabel {
    match *measurement {
        Measurement::BloodPressure { systolic, diastolic } => classify_blood_pressure(systolic, diastolic),
        Measurement::HeartRate { bpm } => classify_heart_rate(bpm),
        Measurement::BloodSugar { mg_dl } => classify_blood_sugar(mg_dl),
        Measurement::Temperature { celsius } => classify_temperature(celsius),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bp_reference_points() {
        assert_eq!(classify_blood_pressure(119, 79), StatusLabel::Normal);
        assert_eq!(classify_blood_pressure(125, 79), StatusLabel::Elevated);
        assert_eq!(classify_blood_pressure(135, 79), StatusLabel::HighBloodPressureStage1);
        assert_eq!(classify_blood_pressure(150, 95), StatusLabel::HighBloodPressureStage2);
        assert_eq!(classify_blood_pressure(85, 55), StatusLabel::Low);
    }

    #[test]
    fn test_bp_low_takes_priority() {
        // Diastolic below 60 wins even with a stage 2 systolic
        assert_eq!(classify_blood_pressure(150, 55), StatusLabel::Low);
        assert_eq!(classify_blood_pressure(89, 70), StatusLabel::Low);
    }

    #[test]
    fn test_bp_boundaries() {
        assert_eq!(classify_blood_pressure(120, 80), StatusLabel::Normal);
        assert_eq!(classify_blood_pressure(121, 80), StatusLabel::Elevated);
        assert_eq!(classify_blood_pressure(129, 80), StatusLabel::Elevated);
        assert_eq!(classify_blood_pressure(130, 70), StatusLabel::HighBloodPressureStage1);
        assert_eq!(classify_blood_pressure(110, 81), StatusLabel::HighBloodPressureStage1);
        assert_eq!(classify_blood_pressure(125, 85), StatusLabel::HighBloodPressureStage1);
        assert_eq!(classify_blood_pressure(140, 70), StatusLabel::HighBloodPressureStage2);
        assert_eq!(classify_blood_pressure(110, 90), StatusLabel::HighBloodPressureStage2);
    }

    #[test]
    fn test_bp_crisis_values_stay_stage_2() {
        assert_eq!(classify_blood_pressure(190, 100), StatusLabel::HighBloodPressureStage2);
        assert_eq!(classify_blood_pressure(150, 125), StatusLabel::HighBloodPressureStage2);
    }

    #[test]
    fn test_bp_every_input_gets_a_label() {
        for systolic in 40..=260 {
            for diastolic in 20..=160 {
                let label = classify_blood_pressure(systolic, diastolic);
                assert_ne!(label, StatusLabel::NotAvailable, "{}/{}", systolic, diastolic);
                assert_ne!(label, StatusLabel::HypertensiveCrisis, "{}/{}", systolic, diastolic);
            }
        }
    }

    #[test]
    fn test_heart_rate() {
        assert_eq!(classify_heart_rate(60.0), StatusLabel::Normal);
        assert_eq!(classify_heart_rate(59.0), StatusLabel::Low);
        assert_eq!(classify_heart_rate(100.0), StatusLabel::Normal);
        assert_eq!(classify_heart_rate(101.0), StatusLabel::High);
        assert_eq!(classify_heart_rate(f64::NAN), StatusLabel::NotAvailable);
    }

    #[test]
    fn test_blood_sugar() {
        assert_eq!(classify_blood_sugar(99.0), StatusLabel::Normal);
        assert_eq!(classify_blood_sugar(100.0), StatusLabel::PreDiabetic);
        assert_eq!(classify_blood_sugar(125.0), StatusLabel::PreDiabetic);
        assert_eq!(classify_blood_sugar(126.0), StatusLabel::High);
        assert_eq!(classify_blood_sugar(69.0), StatusLabel::Low);
        assert_eq!(classify_blood_sugar(70.0), StatusLabel::Normal);
    }

    #[test]
    fn test_blood_sugar_gaps_are_not_available() {
        assert_eq!(classify_blood_sugar(99.5), StatusLabel::NotAvailable);
        assert_eq!(classify_blood_sugar(125.5), StatusLabel::NotAvailable);
    }

    #[test]
    fn test_temperature() {
        assert_eq!(classify_temperature(37.5), StatusLabel::Normal);
        assert_eq!(classify_temperature(35.0), StatusLabel::Normal);
        assert_eq!(classify_temperature(37.6), StatusLabel::High);
        assert_eq!(classify_temperature(34.9), StatusLabel::Low);
    }

    #[test]
    fn test_classify_dispatches_by_metric() {
        assert_eq!(
            classify(&Measurement::BloodPressure { systolic: 125, diastolic: 79 }),
            StatusLabel::Elevated
        );
        assert_eq!(classify(&Measurement::HeartRate { bpm: 110.0 }), StatusLabel::High);
        assert_eq!(classify(&Measurement::BloodSugar { mg_dl: 110.0 }), StatusLabel::PreDiabetic);
        assert_eq!(classify(&Measurement::Temperature { celsius: 34.0 }), StatusLabel::Low);
    }
}
