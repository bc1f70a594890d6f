use std::sync::Arc;

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use incidentcast_api::services::{EventSink, SubmissionReport};
use incidentcast_api::setup;
use incidentcast_api::state::AppState;
use incidentcast_core::{AppError, Config, IncidentRecord};
use tokio::sync::Mutex;

/// Event sink that records every submitted batch instead of calling out.
#[derive(Default)]
pub struct RecordingSink {
    pub batches: Mutex<Vec<Vec<IncidentRecord>>>,
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn submit(&self, records: &[IncidentRecord]) -> Result<SubmissionReport, AppError> {
        self.batches.lock().await.push(records.to_vec());
        Ok(SubmissionReport {
            submitted: records.len(),
            skipped: 0,
        })
    }
}

/// Event sink that always fails, for submission-error paths.
pub struct FailingSink;

#[async_trait]
impl EventSink for FailingSink {
    async fn submit(&self, _records: &[IncidentRecord]) -> Result<SubmissionReport, AppError> {
        Err(AppError::Submission(
            "Amplitude returned 503: service unavailable".to_string(),
        ))
    }
}

/// Test application state
pub struct TestApp {
    pub server: TestServer,
    pub sink: Arc<RecordingSink>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn test_config() -> Config {
    Config::new(
        0,
        "test",
        vec!["*".to_string()],
        10 * 1024 * 1024,
        "test-api-key",
        "http://localhost:0",
        1,
    )
}

/// Setup a test application with a recording event sink.
pub fn setup_test_app() -> TestApp {
    let sink = Arc::new(RecordingSink::default());
    let state = AppState::with_sink(test_config(), sink.clone());
    let router = setup::routes::setup_routes(&test_config(), state).expect("router setup");
    TestApp {
        server: TestServer::new(router).expect("test server"),
        sink,
    }
}

/// Setup a test application whose event sink always fails.
pub fn setup_failing_app() -> TestServer {
    let state = AppState::with_sink(test_config(), Arc::new(FailingSink));
    let router = setup::routes::setup_routes(&test_config(), state).expect("router setup");
    TestServer::new(router).expect("test server")
}

/// Multipart form carrying `content` as an uploaded CSV file.
pub fn csv_form(content: &str) -> MultipartForm {
    csv_form_named(content, "incidents.csv")
}

pub fn csv_form_named(content: &str, filename: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(content.as_bytes().to_vec())
            .file_name(filename)
            .mime_type("text/csv"),
    )
}
