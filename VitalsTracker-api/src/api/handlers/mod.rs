pub mod health;
pub mod readings;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use health::health_check;
pub use readings::{classify_reading, create_reading, get_dashboard, get_history, get_insights};
