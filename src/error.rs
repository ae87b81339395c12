//! Error types.
//!
//! Two layers, matching how failures propagate:
//!
//! - [`SeriesError`]: named conditions raised by the series pipeline itself
//!   (empty-input lookup, schema violation). These carry enough context for
//!   the caller to choose per-condition messaging.
//! - [`AppError`]: the application-boundary error with an exit code, used by
//!   the CLI shell. Exit code convention: 2 = usage/config, 3 = no data,
//!   4 = upstream or data-quality failure.
//!
//! Note that individual malformed records are *not* errors anywhere in this
//! taxonomy: the record parser drops them and counts the drops.

use chrono::NaiveDate;

/// Named failure conditions from the series pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// An operation that requires at least one row was given an empty series
    /// (e.g., latest-value lookup). A usage error, surfaced loudly.
    EmptyInput { what: &'static str },
    /// A post-pipeline invariant was breached (non-finite or negative value).
    /// Never auto-corrected; by this stage data has already been cleaned, so
    /// a violation signals a genuine data-quality or logic defect.
    SchemaViolation {
        row: usize,
        week: NaiveDate,
        message: String,
    },
}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::EmptyInput { what } => {
                write!(f, "Empty input: {what}")
            }
            SeriesError::SchemaViolation { row, week, message } => {
                write!(f, "Schema violation at row {row} (week {week}): {message}")
            }
        }
    }
}

impl std::error::Error for SeriesError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<SeriesError> for AppError {
    fn from(err: SeriesError) -> Self {
        let exit_code = match err {
            SeriesError::EmptyInput { .. } => 3,
            SeriesError::SchemaViolation { .. } => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_errors_map_to_expected_exit_codes() {
        let empty: AppError = SeriesError::EmptyInput { what: "series" }.into();
        assert_eq!(empty.exit_code(), 3);

        let schema: AppError = SeriesError::SchemaViolation {
            row: 0,
            week: NaiveDate::from_ymd_opt(2012, 1, 6).unwrap(),
            message: "negative value".to_string(),
        }
        .into();
        assert_eq!(schema.exit_code(), 4);
    }
}
