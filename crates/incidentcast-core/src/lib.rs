//! Incidentcast Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! CSV validation pipeline shared by all Incidentcast components.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use validation::parse_batch;
pub use error::{AppError, CsvError, ErrorMetadata, LogLevel, RowError};
pub use models::{IncidentRecord, ValidationBatch, PREVIEW_ROWS};
