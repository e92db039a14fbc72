use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid date '{value}' on line {line}")]
    DateParse { line: usize, value: String },

    #[error("Invalid value '{value}' for column '{column}' on line {line}")]
    Parse {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("Missing required column '{raw}' ({semantic})")]
    MissingColumn {
        raw: &'static str,
        semantic: &'static str,
    },

    #[error(
        "Inconsistent totals on line {line}: casual {casual} + registered {registered} != total {total}"
    )]
    InconsistentTotals {
        line: usize,
        casual: u32,
        registered: u32,
        total: u32,
    },

    #[error("Hour {hour} on line {line} is outside 0-23")]
    HourOutOfRange { line: usize, hour: i64 },

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Grouping '{0}' requires hourly records")]
    UnsupportedGrouping(&'static str),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl From<config::ConfigError> for ProcessingError {
    fn from(e: config::ConfigError) -> Self {
        ProcessingError::Config(e.to_string())
    }
}

impl ProcessingError {
    /// Errors raised while reading and transforming the input tables.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            ProcessingError::Io(_)
                | ProcessingError::Csv(_)
                | ProcessingError::DateParse { .. }
                | ProcessingError::Parse { .. }
                | ProcessingError::MissingColumn { .. }
                | ProcessingError::InconsistentTotals { .. }
                | ProcessingError::HourOutOfRange { .. }
                | ProcessingError::InvalidFormat(_)
        )
    }
}
