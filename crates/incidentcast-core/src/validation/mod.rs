//! CSV validation and row normalization
//!
//! Turns raw upload bytes into a [`ValidationBatch`]: the header must match
//! the fixed four-column layout exactly, then each data row is validated
//! independently. Row failures are collected as rejections and never abort
//! the rest of the file.

use ::csv::{ReaderBuilder, StringRecord};
use chrono::NaiveDateTime;

use crate::error::{CsvError, RowError};
use crate::models::{IncidentRecord, ValidationBatch};

/// Required CSV columns, in the exact order they must appear.
pub const EXPECTED_HEADER: [&str; 4] = [
    "user_id",
    "incident_name",
    "short_description",
    "datetime",
];

/// Timestamp pattern accepted in the `datetime` column (24-hour clock).
pub const DATETIME_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Length of a date-only value (`MM/DD/YYYY`); such values are completed
/// with a midnight time component before parsing.
const DATE_ONLY_LEN: usize = 10;

/// Validate raw upload bytes into a batch of normalized incident records.
///
/// Whole-file problems (bad encoding, empty file, wrong header) fail the
/// upload with a [`CsvError`]; individual bad rows end up in the batch's
/// rejection list instead. Record and rejection order follows the file.
pub fn parse_batch(bytes: &[u8]) -> Result<ValidationBatch, CsvError> {
    let text = std::str::from_utf8(bytes).map_err(|_| CsvError::Encoding)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    // flexible(true) lets short/long rows through so they reach our own
    // column-count check instead of aborting the whole read.
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let rows: Vec<StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .map_err(|_| CsvError::Encoding)?;

    let Some((header, data_rows)) = rows.split_first() else {
        return Err(CsvError::EmptyFile);
    };

    let header_fields: Vec<&str> = header.iter().map(str::trim).collect();
    if header_fields != EXPECTED_HEADER {
        return Err(CsvError::Schema {
            found: header_fields.iter().map(|s| s.to_string()).collect(),
        });
    }

    if data_rows.is_empty() {
        // Header-only files are treated the same as empty ones.
        return Err(CsvError::EmptyFile);
    }

    let mut records = Vec::new();
    let mut rejections = Vec::new();

    for (idx, row) in data_rows.iter().enumerate() {
        let row_number = idx + 1;
        match validate_row(row_number, row) {
            Ok(record) => records.push(record),
            Err(rejection) => rejections.push(rejection),
        }
    }

    Ok(ValidationBatch::new(records, rejections, data_rows.len()))
}

/// Validate a single data row. `row_number` is 1-based over data rows.
fn validate_row(row_number: usize, row: &StringRecord) -> Result<IncidentRecord, RowError> {
    if row.len() != EXPECTED_HEADER.len() {
        return Err(RowError::MalformedRow {
            row: row_number,
            columns: row.len(),
        });
    }

    let mut fields = [""; 4];
    for (idx, field_name) in EXPECTED_HEADER.iter().enumerate() {
        let value = row.get(idx).unwrap_or_default().trim();
        if value.is_empty() {
            return Err(RowError::MissingField {
                row: row_number,
                field: field_name,
            });
        }
        fields[idx] = value;
    }

    let [user_id, incident_name, short_description, datetime] = fields;
    let event_time = parse_event_time(datetime).ok_or_else(|| RowError::DateFormat {
        row: row_number,
        value: datetime.to_string(),
    })?;

    Ok(IncidentRecord {
        user_id: user_id.to_string(),
        incident_name: incident_name.to_string(),
        short_description: short_description.to_string(),
        event_time,
    })
}

/// Parse `MM/DD/YYYY HH:MM` as a UTC timestamp. Date-only values are
/// completed with a midnight time component.
fn parse_event_time(value: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let completed;
    let value = if value.len() == DATE_ONLY_LEN {
        completed = format!("{value} 00:00");
        &completed
    } else {
        value
    };
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .ok()
        .map(|dt| dt.and_utc())
}
