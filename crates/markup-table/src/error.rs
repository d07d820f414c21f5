//! Error types for table configuration and ingestion.
//!
//! Rendering itself never fails: an empty table renders the sentinel text
//! [`UNDEFINED_TABLE`](crate::UNDEFINED_TABLE). Errors only surface where the
//! caller hands the renderer something it cannot use, and in every such case
//! the renderer's prior state is left untouched.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when configuring a table or feeding it data.
#[derive(Debug, Error)]
pub enum TableError {
    /// Template input was not a mapping of fragment names to markup.
    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    /// A reshape or ingestion call was given nothing to work with.
    #[error("input is empty")]
    EmptyInput,

    /// The source cannot list its field names and no heading was set.
    #[error("source cannot list field names and no heading is set")]
    MissingFieldNames,

    /// The source value is not the expected shape.
    #[error("invalid tabular source: {0}")]
    InvalidSource(String),

    /// A configuration file could not be loaded.
    #[error("failed to load {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// I/O error while reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parse error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
