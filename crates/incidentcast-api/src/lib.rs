//! Incidentcast API
//!
//! HTTP service for the CSV incident upload flow: validate an uploaded file,
//! hold the resulting batch per session, and forward confirmed batches to
//! Amplitude.

pub mod api_doc;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod pending;
pub mod services;
pub mod session;
pub mod setup;
pub mod state;
pub mod telemetry;
