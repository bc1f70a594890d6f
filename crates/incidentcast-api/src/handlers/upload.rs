use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use incidentcast_core::{parse_batch, AppError, IncidentRecord, RowError};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::session::SessionId;
use crate::state::AppState;

/// One rejected row, with a human-readable reason.
#[derive(Debug, Serialize, ToSchema)]
pub struct RejectionEntry {
    /// 1-based data row number (the first row after the header is row 1).
    pub row: usize,
    pub reason: String,
}

impl From<&RowError> for RejectionEntry {
    fn from(err: &RowError) -> Self {
        RejectionEntry {
            row: err.row(),
            reason: err.to_string(),
        }
    }
}

/// Validation result for one uploaded file.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub filename: String,
    /// Data rows in the file (valid + rejected).
    pub total_rows: usize,
    pub valid_count: usize,
    pub rejected_count: usize,
    /// Whether the batch can be confirmed (at least one valid record).
    pub submittable: bool,
    /// Up to 5 valid records, in file order.
    pub preview: Vec<IncidentRecord>,
    pub rejections: Vec<RejectionEntry>,
}

#[utoipa::path(
    post,
    path = "/api/v0/uploads",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File validated; batch pending confirmation", body = UploadResponse),
        (status = 400, description = "Missing file, bad encoding, or empty file", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 422, description = "Header does not match the required columns", body = ErrorResponse)
    )
)]
pub async fn upload_csv(
    State(state): State<Arc<AppState>>,
    SessionId(session): SessionId,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let (data, filename) = extract_csv_file(multipart).await?;

    if data.len() > state.config.max_upload_size_bytes() {
        return Err(HttpAppError(AppError::PayloadTooLarge(format!(
            "File exceeds the {} byte upload limit",
            state.config.max_upload_size_bytes()
        ))));
    }

    let batch = parse_batch(&data)?;

    let response = UploadResponse {
        filename: filename.clone(),
        total_rows: batch.total_rows(),
        valid_count: batch.records().len(),
        rejected_count: batch.rejections().len(),
        submittable: batch.is_submittable(),
        preview: batch.preview().to_vec(),
        rejections: batch.rejections().iter().map(RejectionEntry::from).collect(),
    };

    tracing::info!(
        session = %session,
        filename = %filename,
        valid = response.valid_count,
        rejected = response.rejected_count,
        "Upload validated"
    );

    // Replaces any batch already pending for this session.
    state.pending.store(session, batch).await;

    Ok(Json(response))
}

/// Pull the single `file` field out of the multipart body and require a
/// `.csv` filename.
async fn extract_csv_file(mut multipart: Multipart) -> Result<(Vec<u8>, String), HttpAppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {e}")))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "file" {
            if file_data.is_some() {
                return Err(HttpAppError(AppError::InvalidInput(
                    "Multiple file fields are not allowed; send exactly one field named 'file'"
                        .to_string(),
                )));
            }
            filename = field.file_name().map(|s: &str| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {e}")))?;
            file_data = Some(data.to_vec());
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    let filename = filename
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::InvalidInput("No selected file".to_string()))?;

    if !filename.to_lowercase().ends_with(".csv") {
        return Err(HttpAppError(AppError::InvalidInput(format!(
            "Please upload a valid CSV file (got '{filename}')"
        ))));
    }

    Ok((file_data, filename))
}
