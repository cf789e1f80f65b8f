//! Error types for the Quarry library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Quarry operations.
#[derive(Debug, Error)]
pub enum QuarryError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Report persistence failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A request was rejected before any data was touched.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No dataset is currently loaded.
    #[error("No dataset is currently loaded. Load a dataset first.")]
    NoDatasetLoaded,

    /// No report exists for the given id.
    #[error("No summary report found with id {0}")]
    ReportNotFound(u64),

    /// The selected subset has no numeric columns.
    #[error("The selection contains no numeric columns")]
    NoNumericColumns,

    /// A heatmap was requested without a usable heatmap metric.
    #[error("Heatmap requires a summary report with exactly one heatmap metric ({0} found)")]
    MissingHeatmap(usize),

    /// A plot axis names a column that is not numeric in the subset.
    #[error("Column '{0}' is not a numeric column in the selection")]
    NotNumeric(String),

    /// Loading subset data failed for a reason other than "nothing loaded".
    #[error("Failed to load subset data: {0}")]
    SubsetLoad(String),

    /// A header edit supplied a blank name.
    #[error("Header cannot be blank")]
    BlankHeader,

    /// A header edit collided with another column's header.
    #[error("Header already exists: '{0}'")]
    DuplicateHeader(String),

    /// The dataset itself holds blank or duplicate headers.
    #[error("Dataset headers are corrupt: {0}")]
    CorruptHeaders(String),

    /// A column name did not match any column.
    #[error("Unknown column: '{0}'")]
    UnknownColumn(String),

    /// A cell address was outside the dataset.
    #[error("Cell ({row}, {column}) is outside the dataset")]
    CellOutOfBounds { row: usize, column: usize },
}

/// Result type alias for Quarry operations.
pub type Result<T> = std::result::Result<T, QuarryError>;
