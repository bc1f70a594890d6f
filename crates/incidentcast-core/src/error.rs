//! Error types module
//!
//! Whole-file CSV failures (`CsvError`) abort an upload before any batch is
//! stored. Row-level failures (`RowError`) are recovered locally: the row is
//! rejected and processing continues. `AppError` unifies both with the
//! service-level failures (nothing pending, submission failure) so the API
//! crate can render them consistently.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented.
/// This trait allows errors to self-describe their HTTP response characteristics.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "SCHEMA_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Whole-file CSV errors. Any of these fails the entire upload; no batch is
/// produced and nothing is stored.
#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("File is not valid UTF-8 text")]
    Encoding,

    #[error("CSV file is empty or contains only a header row")]
    EmptyFile,

    #[error("CSV columns must be exactly: {}; found: {}", crate::validation::EXPECTED_HEADER.join(", "), found.join(", "))]
    Schema { found: Vec<String> },
}

/// Row-level validation errors. Each carries the 1-based data row number
/// (the first row after the header is row 1). The offending row is rejected;
/// sibling rows are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("Row {row} has {columns} columns, expected 4")]
    MalformedRow { row: usize, columns: usize },

    #[error("Row {row}: {field} cannot be empty")]
    MissingField { row: usize, field: &'static str },

    #[error("Row {row}: '{value}' does not match the MM/DD/YYYY HH:MM format")]
    DateFormat { row: usize, value: String },
}

impl RowError {
    /// The 1-based data row number this rejection refers to.
    pub fn row(&self) -> usize {
        match self {
            RowError::MalformedRow { row, .. }
            | RowError::MissingField { row, .. }
            | RowError::DateFormat { row, .. } => *row,
        }
    }
}

/// Unified application error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error("No validated incidents are pending submission")]
    NothingToSend,

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Static metadata per variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::Csv(CsvError::Encoding) => (400, "ENCODING_ERROR", LogLevel::Debug),
        AppError::Csv(CsvError::EmptyFile) => (400, "EMPTY_FILE_ERROR", LogLevel::Debug),
        AppError::Csv(CsvError::Schema { .. }) => (422, "SCHEMA_ERROR", LogLevel::Debug),
        AppError::NothingToSend => (409, "NOTHING_TO_SEND", LogLevel::Debug),
        AppError::Submission(_) => (502, "SUBMISSION_ERROR", LogLevel::Warn),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", LogLevel::Debug),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_messages_are_human_readable() {
        let err = RowError::MissingField {
            row: 2,
            field: "user_id",
        };
        assert_eq!(err.to_string(), "Row 2: user_id cannot be empty");
        assert_eq!(err.row(), 2);

        let err = RowError::DateFormat {
            row: 7,
            value: "2024-01-01 10:00".to_string(),
        };
        assert!(err.to_string().contains("MM/DD/YYYY HH:MM"));
        assert!(err.to_string().contains("2024-01-01 10:00"));
    }

    #[test]
    fn test_schema_error_lists_expected_and_found_columns() {
        let err = CsvError::Schema {
            found: vec!["user".to_string(), "name".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("user_id, incident_name, short_description, datetime"));
        assert!(msg.contains("user, name"));
    }

    #[test]
    fn test_app_error_metadata() {
        assert_eq!(AppError::NothingToSend.http_status_code(), 409);
        assert_eq!(AppError::NothingToSend.error_code(), "NOTHING_TO_SEND");
        assert_eq!(
            AppError::Csv(CsvError::EmptyFile).error_code(),
            "EMPTY_FILE_ERROR"
        );
        assert_eq!(
            AppError::Submission("boom".to_string()).http_status_code(),
            502
        );
        assert_eq!(
            AppError::Submission("boom".to_string()).log_level(),
            LogLevel::Warn
        );
    }
}
