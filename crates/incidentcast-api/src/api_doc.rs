//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::services;
use incidentcast_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Incidentcast API",
        version = "0.1.0",
        description = "Incident CSV ingest service (v0): upload a CSV of incident records, preview the validated rows, then confirm to forward them to Amplitude. All endpoints are versioned under /api/v0/."
    ),
    paths(
        handlers::upload::upload_csv,
        handlers::cancel::cancel_upload,
        handlers::confirm::confirm_upload,
        handlers::health::health,
    ),
    components(schemas(
        models::IncidentRecord,
        handlers::upload::UploadResponse,
        handlers::upload::RejectionEntry,
        handlers::cancel::CancelResponse,
        handlers::confirm::ConfirmResponse,
        handlers::health::HealthResponse,
        services::SubmissionReport,
        error::ErrorResponse,
    )),
    tags(
        (name = "uploads", description = "CSV upload, preview, and confirmation"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

/// The OpenAPI spec served at /api/openapi.json.
pub fn openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
