use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::HttpAppError;
use crate::session::SessionId;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct CancelResponse {
    /// Whether a pending batch was actually discarded.
    pub cancelled: bool,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/uploads/cancel",
    tag = "uploads",
    responses(
        (status = 200, description = "Pending batch discarded (or nothing was pending)", body = CancelResponse)
    )
)]
pub async fn cancel_upload(
    State(state): State<Arc<AppState>>,
    SessionId(session): SessionId,
) -> Result<Json<CancelResponse>, HttpAppError> {
    let cancelled = state.pending.cancel(session).await;

    let message = if cancelled {
        tracing::info!(session = %session, "Pending batch cancelled");
        "Upload cancelled.".to_string()
    } else {
        "No upload was pending.".to_string()
    };

    Ok(Json(CancelResponse { cancelled, message }))
}
