//! Data models for the application

mod incident;

// Re-export all models for convenient imports
pub use incident::*;
