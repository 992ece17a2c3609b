// Domain entities and value objects
pub mod conversions;
pub mod dashboard;
pub mod errors;
pub mod latest;
pub mod reading;
pub mod request;
pub mod status;

// Re-export common types for easier imports
pub use dashboard::{Dashboard, MetricSummary};
pub use errors::ValidationError;
pub use latest::LatestByType;
pub use reading::{Measurement, MetricType, Reading};
pub use request::{CreateReadingRequest, NumericInput};
pub use status::StatusLabel;
