//! The nested-table contract shared by every adapter
//!
//! A nested table is a sub-collection embedded in an owner record (points in
//! a pathgrid, reactions in a faction, ...) exposed to a generic table view
//! as rows and columns. Each adapter translates the view's row/column
//! addressing into edits on a copy of the owner snapshot and commits that
//! copy back through [`Record::commit`].

use crate::error::{Error, Result};
use crate::faction::Reactions;
use crate::pathgrid::{Edge, PathgridPoints};
use crate::record::Record;
use crate::region::SoundRef;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one nested table shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestedTableKind {
    PathgridPoints,
    PathgridEdges,
    FactionReactions,
    RegionSounds,
    InfoResultScript,
}

impl NestedTableKind {
    /// Human-readable table name
    pub fn name(&self) -> &'static str {
        match self {
            NestedTableKind::PathgridPoints => "pathgrid points",
            NestedTableKind::PathgridEdges => "pathgrid edges",
            NestedTableKind::FactionReactions => "faction reactions",
            NestedTableKind::RegionSounds => "region sounds",
            NestedTableKind::InfoResultScript => "info result script",
        }
    }
}

impl fmt::Display for NestedTableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type of the values a column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    String,
}

/// Static description of one nested column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Header label
    pub name: &'static str,
    /// Value type shown in the cell
    pub kind: ValueKind,
    /// Writes to a read-only column are accepted and dropped
    pub read_only: bool,
}

impl ColumnSpec {
    /// Create a writable column
    pub const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            read_only: false,
        }
    }

    /// Create a column whose writes are ignored
    pub const fn read_only(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            read_only: true,
        }
    }
}

/// Bulk copy of a whole nested table, moved between the adapter and the view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "table", rename_all = "snake_case")]
pub enum NestedTable {
    /// Points travel with the edges that reference them
    PathgridPoints(PathgridPoints),
    PathgridEdges(Vec<Edge>),
    FactionReactions(Reactions),
    RegionSounds(Vec<SoundRef>),
}

impl NestedTable {
    pub fn kind(&self) -> NestedTableKind {
        match self {
            NestedTable::PathgridPoints(_) => NestedTableKind::PathgridPoints,
            NestedTable::PathgridEdges(_) => NestedTableKind::PathgridEdges,
            NestedTable::FactionReactions(_) => NestedTableKind::FactionReactions,
            NestedTable::RegionSounds(_) => NestedTableKind::RegionSounds,
        }
    }

    /// Number of rows in the table
    pub fn row_count(&self) -> usize {
        match self {
            NestedTable::PathgridPoints(p) => p.points.len(),
            NestedTable::PathgridEdges(e) => e.len(),
            NestedTable::FactionReactions(r) => r.len(),
            NestedTable::RegionSounds(s) => s.len(),
        }
    }
}

/// Row/column access to a sub-collection of an owner record of type `T`.
///
/// Every mutating call reads one snapshot, derives one replacement and makes
/// at most one commit. A call that fails leaves the record untouched.
pub trait NestedTableAdapter<T> {
    /// Which nested table this adapter exposes
    fn kind(&self) -> NestedTableKind;

    /// Column layout, indexed by column number
    fn column_specs(&self) -> &'static [ColumnSpec];

    /// Insert a blank row at `position` (`position == rows` appends)
    fn add_row(&self, record: &mut Record<T>, position: usize) -> Result<()>;

    /// Remove the row at `position`
    fn remove_row(&self, record: &mut Record<T>, position: usize) -> Result<()>;

    /// Replace the whole sub-collection from a bulk value
    fn set_table(&self, record: &mut Record<T>, table: NestedTable) -> Result<()>;

    /// Copy the whole sub-collection out for bulk transport
    fn table(&self, record: &Record<T>) -> Result<NestedTable>;

    /// Read one cell
    fn get_data(&self, record: &Record<T>, row: usize, column: usize) -> Result<CellValue>;

    /// Write one cell and commit
    fn set_data(
        &self,
        record: &mut Record<T>,
        value: &CellValue,
        row: usize,
        column: usize,
    ) -> Result<()>;

    /// Get the number of columns
    fn columns_count(&self, _record: &Record<T>) -> usize {
        self.column_specs().len()
    }

    /// Get the number of rows
    fn rows_count(&self, record: &Record<T>) -> usize;
}

/// Fail unless `row` addresses an existing row
pub(crate) fn check_row(row: usize, len: usize) -> Result<()> {
    if row >= len {
        return Err(Error::OutOfRange { index: row, len });
    }
    Ok(())
}

/// Fail unless `position` is a valid insertion point (end included)
pub(crate) fn check_insert(position: usize, len: usize) -> Result<()> {
    if position > len {
        return Err(Error::OutOfRange {
            index: position,
            len,
        });
    }
    Ok(())
}

/// Look up a column, failing with [`Error::InvalidColumn`] if it does not exist
pub(crate) fn check_column(
    table: NestedTableKind,
    specs: &'static [ColumnSpec],
    column: usize,
) -> Result<&'static ColumnSpec> {
    specs
        .get(column)
        .ok_or_else(|| invalid_column(table, specs, column))
}

pub(crate) fn invalid_column(
    table: NestedTableKind,
    specs: &'static [ColumnSpec],
    column: usize,
) -> Error {
    Error::InvalidColumn {
        table,
        column,
        count: specs.len(),
    }
}

/// Error for a bulk value that belongs to another table
pub(crate) fn mismatch(expected: NestedTableKind, table: &NestedTable) -> Error {
    Error::TableMismatch {
        expected,
        found: table.kind(),
    }
}
