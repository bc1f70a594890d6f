//! Amplitude event submission.
//!
//! Maps validated incident records to Amplitude's batch HTTP API. Delivery is
//! a single call with no retry: a failed batch is reported to the user and
//! must be re-uploaded.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use incidentcast_core::{AppError, IncidentRecord};
use reqwest::Client;
use serde::Serialize;

use super::{EventSink, SubmissionReport};

/// Event type recorded for every submitted incident.
const EVENT_TYPE: &str = "Incident";

/// Amplitude rejects user ids shorter than 5 characters; such records are
/// skipped with a warning instead of failing the whole batch.
const MIN_USER_ID_LEN: usize = 5;

#[derive(Debug, Serialize)]
struct AmplitudeEvent<'a> {
    user_id: &'a str,
    event_type: &'static str,
    /// Event time in epoch milliseconds.
    time: i64,
    event_properties: EventProperties<'a>,
}

#[derive(Debug, Serialize)]
struct EventProperties<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct BatchRequest<'a> {
    api_key: &'a str,
    events: Vec<AmplitudeEvent<'a>>,
}

/// HTTP client for Amplitude's `/2/httpapi` endpoint.
pub struct AmplitudeClient {
    http_client: Client,
    endpoint: String,
    api_key: String,
}

impl AmplitudeClient {
    pub fn new(endpoint: &str, api_key: &str, timeout_seconds: u64) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client for Amplitude")?;

        Ok(Self {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn build_events<'a>(&self, records: &'a [IncidentRecord]) -> (Vec<AmplitudeEvent<'a>>, usize) {
        let mut events = Vec::with_capacity(records.len());
        let mut skipped = 0;

        for record in records {
            if record.user_id.len() < MIN_USER_ID_LEN {
                tracing::warn!(
                    user_id = %record.user_id,
                    "Skipping event: user id shorter than {} characters",
                    MIN_USER_ID_LEN
                );
                skipped += 1;
                continue;
            }
            events.push(AmplitudeEvent {
                user_id: &record.user_id,
                event_type: EVENT_TYPE,
                time: record.event_time.timestamp_millis(),
                event_properties: EventProperties {
                    name: &record.incident_name,
                    description: &record.short_description,
                },
            });
        }

        (events, skipped)
    }
}

#[async_trait]
impl EventSink for AmplitudeClient {
    #[tracing::instrument(skip(self, records), fields(record_count = records.len()))]
    async fn submit(&self, records: &[IncidentRecord]) -> Result<SubmissionReport, AppError> {
        let (events, skipped) = self.build_events(records);

        if events.is_empty() {
            return Err(AppError::Submission(
                "All records were skipped before delivery".to_string(),
            ));
        }

        let submitted = events.len();
        let body = BatchRequest {
            api_key: &self.api_key,
            events,
        };

        let response = self
            .http_client
            .post(format!("{}/2/httpapi", self.endpoint))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Submission(format!("Request to Amplitude failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let response_body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Failed to read response body"));
            return Err(AppError::Submission(format!(
                "Amplitude returned {status}: {response_body}"
            )));
        }

        tracing::info!(submitted, skipped, "Batch delivered to Amplitude");

        Ok(SubmissionReport { submitted, skipped })
    }
}
