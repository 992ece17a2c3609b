// Public entities for the vitals tracker API
// This module contains data structures that are shared across the application boundary

// Readings, dashboard and insight payloads
pub mod reading;

// Common entities for error handling, pagination, etc.
pub mod common;
