// VitalsTracker Data
// This crate owns persistence: key-value backends and the reading history store

// Storage configuration and SQLite connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
