pub mod classifier;
pub mod dashboard;
pub mod insights;
pub mod latest;
pub mod tracker;

// Domain services
// Classification, selection and insight rules are pure functions; the tracker
// service wires them to the history repository.

pub use classifier::{classify, classify_blood_pressure, classify_blood_sugar, classify_heart_rate, classify_temperature};
pub use dashboard::build_dashboard;
pub use insights::{generate_insights, ALL_NORMAL_MESSAGE, NO_INSIGHTS_MESSAGE};
pub use latest::compute_latest_by_type;
pub use tracker::{
    create_default_tracker_service, HealthTrackerService, HealthTrackerServiceTrait, HistoryFilter, TrackerServiceError,
};
