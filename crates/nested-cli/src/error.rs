//! Error types for nested-cli

use nested_core::NestedTableKind;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Adapter or record failure
    #[error(transparent)]
    Core(#[from] nested_core::Error),

    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The loaded record has no such nested table
    #[error("{record} records have no {table} table")]
    NoSuchTable {
        record: &'static str,
        table: NestedTableKind,
    },

    #[error("unknown format '{0}', supported formats: csv, json")]
    UnknownFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
