//! Error types for calendar generation.
//!
//! Only structural failures are errors. Malformed rows, unparseable times,
//! overflowing cells and broken background images all degrade gracefully
//! and never reach this type.

use thiserror::Error;

/// The top-level error type for all calendar operations.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Month mismatch: expected {expected}, found {found}")]
    MonthMismatch { expected: String, found: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for CalendarError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

/// Result type alias using [`CalendarError`].
pub type Result<T> = std::result::Result<T, CalendarError>;
