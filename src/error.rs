use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a dashboard run.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The dataset file could not be opened or its CSV structure is broken.
    #[error("Failed to read dataset {path}: {source}")]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row survived the missing-value filters but a field did not convert.
    #[error("Row {row}: cannot convert {field} value {value:?} to {expected}")]
    Coercion {
        row: usize,
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A filter option given on the command line is unusable.
    #[error("Invalid filter: {0}")]
    Filter(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
