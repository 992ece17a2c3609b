use thiserror::Error;

/// Reasons a reading cannot be created from user input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A field required by the metric type was absent or blank
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Input could not be read as a whole number
    #[error("{field} must be a whole number, got '{input}'")]
    NotAnInteger {
        field: &'static str,
        input: String,
    },

    /// Input could not be read as a number
    #[error("{field} must be a number, got '{input}'")]
    NotANumber {
        field: &'static str,
        input: String,
    },

    /// Input parsed but is NaN or infinite
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    /// Any other rule violation, e.g. notes too long
    #[error("{0}")]
    Invalid(String),
}
