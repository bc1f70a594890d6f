use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::RowError;

/// Number of valid records shown in an upload preview.
pub const PREVIEW_ROWS: usize = 5;

/// One validated incident row, normalized from the CSV upload.
///
/// All string fields are trimmed and non-empty; `event_time` is the parsed
/// `MM/DD/YYYY HH:MM` value interpreted as UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IncidentRecord {
    pub user_id: String,
    pub incident_name: String,
    pub short_description: String,
    pub event_time: DateTime<Utc>,
}

/// The result of validating one upload: valid records and row-level
/// rejections, both in file order. Created once per upload and never mutated
/// afterwards; consumed by confirm or discarded by cancel.
#[derive(Debug, Clone)]
pub struct ValidationBatch {
    records: Vec<IncidentRecord>,
    rejections: Vec<RowError>,
    total_rows: usize,
}

impl ValidationBatch {
    pub fn new(
        records: Vec<IncidentRecord>,
        rejections: Vec<RowError>,
        total_rows: usize,
    ) -> Self {
        Self {
            records,
            rejections,
            total_rows,
        }
    }

    /// All valid records, in original file order.
    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    /// Row-level rejections, in original file order.
    pub fn rejections(&self) -> &[RowError] {
        &self.rejections
    }

    /// Number of data rows in the uploaded file (valid + rejected).
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// The first `PREVIEW_ROWS` valid records, for display.
    pub fn preview(&self) -> &[IncidentRecord] {
        &self.records[..self.records.len().min(PREVIEW_ROWS)]
    }

    /// A batch is eligible for submission iff it has at least one valid record.
    /// An all-rejected batch is still returned for display but never sent.
    pub fn is_submittable(&self) -> bool {
        !self.records.is_empty()
    }

    /// Consume the batch, yielding its valid records for submission.
    pub fn into_records(self) -> Vec<IncidentRecord> {
        self.records
    }
}
