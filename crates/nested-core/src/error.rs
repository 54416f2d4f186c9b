//! Error types for nested-core

use crate::adapter::NestedTableKind;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by nested table adapters and the record container
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Row or insertion position outside the sub-collection
    #[error("index {index} out of range for {len} row(s)")]
    OutOfRange { index: usize, len: usize },

    /// Column index with no mapping in this table
    #[error("{table} subcolumn index {column} out of range ({count} column(s))")]
    InvalidColumn {
        table: NestedTableKind,
        column: usize,
        count: usize,
    },

    /// Structural operation requested on a fixed-shape table
    #[error("{operation} is not supported by the fixed {table} table")]
    Unsupported {
        table: NestedTableKind,
        operation: &'static str,
    },

    /// Bulk value of the wrong shape handed to an adapter
    #[error("expected a {expected} table, found {found}")]
    TableMismatch {
        expected: NestedTableKind,
        found: NestedTableKind,
    },

    /// Undo requested on a record with an empty undo log
    #[error("nothing to undo")]
    NothingToUndo,
}
