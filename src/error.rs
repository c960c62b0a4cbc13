use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while loading and summarising trip data.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// The city's source file could not be opened.
    #[error("Failed to read {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A header or data row could not be parsed. Row 0 is the header.
    #[error("Malformed trip data at row {row}: {message}")]
    DataFormat { row: u64, message: String },

    /// An aggregate that needs at least one trip was asked for over none.
    #[error("Cannot compute {0} over an empty dataset")]
    EmptyDataset(&'static str),

    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Invalid month filter: {0}")]
    InvalidMonth(String),

    #[error("Invalid day filter: {0}")]
    InvalidDay(String),

    /// The city catalog file is unreadable or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input ended while a question was still waiting for an answer.
    #[error("Input closed before an answer was given")]
    InputClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BikeshareError {
    pub(crate) fn data_format(row: u64, message: impl ToString) -> Self {
        BikeshareError::DataFormat {
            row,
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
