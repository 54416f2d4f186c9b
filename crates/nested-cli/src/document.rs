//! Record files and the editing session built from them

use crate::error::{CliError, Result};
use nested_core::{
    CellValue, Faction, FactionReactionsAdapter, Info, InfoScriptAdapter, NestedTableAdapter,
    NestedTableKind, Pathgrid, PathgridEdgesAdapter, PathgridPointsAdapter, Record, Region,
    RegionSoundsAdapter,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single owner record stored as JSON, tagged by record type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordDocument {
    Pathgrid(Pathgrid),
    Faction(Faction),
    Region(Region),
    Info(Info),
}

impl RecordDocument {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| CliError::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Work done against one nested table of whatever record type is loaded
pub trait TableVisitor {
    type Output;

    fn visit<T: Clone>(
        self,
        record: &mut Record<T>,
        adapter: &dyn NestedTableAdapter<T>,
    ) -> nested_core::Result<Self::Output>;
}

/// A loaded record wrapped for editing
pub enum Session {
    Pathgrid(Record<Pathgrid>),
    Faction(Record<Faction>),
    Region(Record<Region>),
    Info(Record<Info>),
}

impl Session {
    pub fn open(document: RecordDocument) -> Self {
        match document {
            RecordDocument::Pathgrid(p) => {
                let label = p.id.clone();
                Session::Pathgrid(Record::new(p).with_label(label))
            }
            RecordDocument::Faction(f) => {
                let label = f.id.clone();
                Session::Faction(Record::new(f).with_label(label))
            }
            RecordDocument::Region(r) => {
                let label = r.id.clone();
                Session::Region(Record::new(r).with_label(label))
            }
            RecordDocument::Info(i) => {
                let label = i.id.clone();
                Session::Info(Record::new(i).with_label(label))
            }
        }
    }

    pub fn record_type(&self) -> &'static str {
        match self {
            Session::Pathgrid(_) => "pathgrid",
            Session::Faction(_) => "faction",
            Session::Region(_) => "region",
            Session::Info(_) => "info",
        }
    }

    /// Run `visitor` against the adapter for `table`
    pub fn visit<V: TableVisitor>(&mut self, table: NestedTableKind, visitor: V) -> Result<V::Output> {
        let output = match (self, table) {
            (Session::Pathgrid(r), NestedTableKind::PathgridPoints) => {
                visitor.visit(r, &PathgridPointsAdapter)?
            }
            (Session::Pathgrid(r), NestedTableKind::PathgridEdges) => {
                visitor.visit(r, &PathgridEdgesAdapter)?
            }
            (Session::Faction(r), NestedTableKind::FactionReactions) => {
                visitor.visit(r, &FactionReactionsAdapter)?
            }
            (Session::Region(r), NestedTableKind::RegionSounds) => {
                visitor.visit(r, &RegionSoundsAdapter)?
            }
            (Session::Info(r), NestedTableKind::InfoResultScript) => {
                visitor.visit(r, &InfoScriptAdapter)?
            }
            (session, table) => {
                return Err(CliError::NoSuchTable {
                    record: session.record_type(),
                    table,
                })
            }
        };
        Ok(output)
    }

    /// Current snapshot as a record file
    pub fn document(&self) -> RecordDocument {
        match self {
            Session::Pathgrid(r) => RecordDocument::Pathgrid(r.get().clone()),
            Session::Faction(r) => RecordDocument::Faction(r.get().clone()),
            Session::Region(r) => RecordDocument::Region(r.get().clone()),
            Session::Info(r) => RecordDocument::Info(r.get().clone()),
        }
    }
}

/// Headers and cells of a nested table, as a view would display them
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub table: NestedTableKind,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Read every cell through the adapter
pub struct Collect;

impl TableVisitor for Collect {
    type Output = TableView;

    fn visit<T: Clone>(
        self,
        record: &mut Record<T>,
        adapter: &dyn NestedTableAdapter<T>,
    ) -> nested_core::Result<TableView> {
        let record: &Record<T> = record;
        let columns = adapter.columns_count(record);
        let rows = (0..adapter.rows_count(record))
            .map(|row| {
                (0..columns)
                    .map(|column| adapter.get_data(record, row, column))
                    .collect::<nested_core::Result<Vec<_>>>()
            })
            .collect::<nested_core::Result<Vec<_>>>()?;

        Ok(TableView {
            table: adapter.kind(),
            headers: adapter.column_specs().iter().map(|c| c.name).collect(),
            rows,
        })
    }
}
