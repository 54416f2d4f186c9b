//! Edit scripts: a list of row/column operations against one nested table

use crate::document::TableVisitor;
use crate::error::{CliError, Result};
use nested_core::{CellValue, NestedTable, NestedTableAdapter, NestedTableKind, Record};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One operation, in the order a table view would issue it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TableOp {
    AddRow { position: usize },
    RemoveRow { position: usize },
    SetData { row: usize, column: usize, value: CellValue },
    SetTable { table: NestedTable },
    Undo,
}

/// A script file targeting one nested table of the loaded record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditScript {
    pub table: NestedTableKind,
    pub ops: Vec<TableOp>,
}

impl EditScript {
    pub fn new(table: NestedTableKind) -> Self {
        Self {
            table,
            ops: Vec::new(),
        }
    }

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

/// Outcome of running a script
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReport {
    pub applied: usize,
    pub revision: u64,
    /// Tables the last commit touched, which a view should refresh
    pub refresh: Vec<NestedTableKind>,
}

/// Apply operations in order, stopping at the first failure
pub struct Apply<'a>(pub &'a [TableOp]);

impl TableVisitor for Apply<'_> {
    type Output = ApplyReport;

    fn visit<T: Clone>(
        self,
        record: &mut Record<T>,
        adapter: &dyn NestedTableAdapter<T>,
    ) -> nested_core::Result<ApplyReport> {
        for (i, op) in self.0.iter().enumerate() {
            debug!(index = i, ?op, table = %adapter.kind(), "applying operation");
            match op {
                TableOp::AddRow { position } => adapter.add_row(record, *position)?,
                TableOp::RemoveRow { position } => adapter.remove_row(record, *position)?,
                TableOp::SetData { row, column, value } => {
                    adapter.set_data(record, value, *row, *column)?
                }
                TableOp::SetTable { table } => adapter.set_table(record, table.clone())?,
                TableOp::Undo => {
                    record.undo()?;
                }
            }
        }

        Ok(ApplyReport {
            applied: self.0.len(),
            revision: record.revision(),
            refresh: record.last_touched().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{RecordDocument, Session};
    use nested_core::Edge;

    fn pathgrid_session() -> Session {
        let doc: RecordDocument = serde_json::from_str(
            r#"{
                "type": "pathgrid",
                "id": "Vivec",
                "data": {"x": 3, "y": -9, "granularity": 0, "point_count": 2},
                "points": [
                    {"x": 0, "y": 0, "z": 0, "autogenerated": 0, "connection_count": 1, "unknown": 0},
                    {"x": 5, "y": 5, "z": 0, "autogenerated": 0, "connection_count": 1, "unknown": 0}
                ],
                "edges": [{"v0": 0, "v1": 1}, {"v0": 1, "v1": 0}]
            }"#,
        )
        .unwrap();
        Session::open(doc)
    }

    #[test]
    fn test_script_json() {
        let script: EditScript = serde_json::from_str(
            r#"{"table":"region_sounds","ops":[
                {"op":"add_row","position":0},
                {"op":"set_data","row":0,"column":1,"value":200},
                {"op":"undo"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(script.table, NestedTableKind::RegionSounds);
        assert_eq!(
            script.ops[1],
            TableOp::SetData {
                row: 0,
                column: 1,
                value: CellValue::Integer(200)
            }
        );
        assert_eq!(script.ops[2], TableOp::Undo);
    }

    #[test]
    fn test_apply_point_insert_reports_edge_refresh() {
        let mut session = pathgrid_session();
        let ops = vec![TableOp::AddRow { position: 0 }];

        let report = session
            .visit(NestedTableKind::PathgridPoints, Apply(&ops))
            .unwrap();
        assert_eq!(report.applied, 1);
        assert_eq!(report.revision, 1);
        assert_eq!(
            report.refresh,
            vec![NestedTableKind::PathgridPoints, NestedTableKind::PathgridEdges]
        );

        match session.document() {
            RecordDocument::Pathgrid(p) => {
                assert_eq!(p.edges, vec![Edge::new(1, 2), Edge::new(2, 1)]);
                assert_eq!(p.data.point_count, 3);
            }
            other => panic!("unexpected document {:?}", other),
        }
    }

    #[test]
    fn test_apply_stops_at_first_error() {
        let mut session = pathgrid_session();
        let ops = vec![
            TableOp::RemoveRow { position: 5 },
            TableOp::AddRow { position: 0 },
        ];

        let err = session
            .visit(NestedTableKind::PathgridEdges, Apply(&ops))
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(nested_core::Error::OutOfRange { index: 5, len: 2 })
        ));
    }
}
