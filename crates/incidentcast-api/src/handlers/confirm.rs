use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::session::SessionId;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ConfirmResponse {
    /// Records delivered to the event service.
    pub submitted: usize,
    /// Records dropped before delivery.
    pub skipped: usize,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/uploads/confirm",
    tag = "uploads",
    responses(
        (status = 200, description = "Batch submitted to the event service", body = ConfirmResponse),
        (status = 409, description = "No submittable batch pending for this session", body = ErrorResponse),
        (status = 502, description = "Event service rejected the batch; pending state is cleared", body = ErrorResponse)
    )
)]
pub async fn confirm_upload(
    State(state): State<Arc<AppState>>,
    SessionId(session): SessionId,
) -> Result<Json<ConfirmResponse>, HttpAppError> {
    // The batch is removed before the outbound call, so it is never sent
    // twice: a failed submission must be re-uploaded.
    let batch = state.pending.take_submittable(session).await?;

    let report = state.sink.submit(batch.records()).await?;

    tracing::info!(
        session = %session,
        submitted = report.submitted,
        skipped = report.skipped,
        "Batch confirmed and submitted"
    );

    Ok(Json(ConfirmResponse {
        submitted: report.submitted,
        skipped: report.skipped,
        message: format!("{} event(s) sent successfully.", report.submitted),
    }))
}
