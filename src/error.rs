//! Error types for catalog fetch and persistence operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching a dataset or persisting it
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport failure (connect, send, decode)
    #[error("HTTP request failed for {url}: {message}")]
    Http { url: String, message: String },

    /// Catalog answered with a non-success status
    #[error("Catalog returned HTTP {status} for {url}")]
    CatalogStatus { status: u16, url: String },

    /// Dataset name/version pair is not present in the catalog
    #[error("Dataset not found in catalog: {name} v{version}")]
    DatasetNotFound { name: String, version: u32 },

    /// Catalog metadata is missing a field the fetch relies on
    #[error("Malformed catalog metadata: {message}")]
    Metadata { message: String },

    /// ARFF payload could not be parsed
    #[error("ARFF parse error at line {line}: {message}")]
    ArffParse { line: usize, message: String },

    /// A non-target attribute is not numeric
    #[error("Attribute '{name}' is not numeric and cannot join the feature table")]
    NonNumericFeature { name: String },

    /// A row has no class label
    #[error("Missing class label at row {row}")]
    MissingLabel { row: usize },

    /// A label category is not an integer
    #[error("Label '{value}' at row {row} is not an integer")]
    LabelParse { value: String, row: usize },

    /// A label value does not fit the 8-bit signed label type
    #[error("Label value {value} at row {row} does not fit in i8")]
    LabelRange { value: i64, row: usize },

    /// Feature and label row counts disagree
    #[error("Row count mismatch: {feature_rows} feature rows, {label_rows} labels")]
    ShapeMismatch { feature_rows: usize, label_rows: usize },

    /// Persist target directory does not exist
    #[error("Output directory does not exist: {path}")]
    MissingOutputDir { path: PathBuf },

    /// Arrow serialization error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the failure happened on the catalog side of the fetch
    /// (transport, lookup, or a payload that could not be understood),
    /// as opposed to local conversion or persistence I/O.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Http { .. }
                | Self::CatalogStatus { .. }
                | Self::DatasetNotFound { .. }
                | Self::Metadata { .. }
                | Self::ArffParse { .. }
        )
    }
}
