//! Outbound services.

pub mod amplitude;

use async_trait::async_trait;
use incidentcast_core::{AppError, IncidentRecord};
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of one batch submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct SubmissionReport {
    /// Records delivered to the event service.
    pub submitted: usize,
    /// Records dropped before delivery (e.g. user id too short for the
    /// event service).
    pub skipped: usize,
}

/// Destination for confirmed incident batches. Production uses
/// [`amplitude::AmplitudeClient`]; tests inject a recording sink.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn submit(&self, records: &[IncidentRecord]) -> Result<SubmissionReport, AppError>;
}
