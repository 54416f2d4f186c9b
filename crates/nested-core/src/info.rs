//! Dialogue info records and their single-cell result script table

use crate::adapter::{
    check_row, invalid_column, ColumnSpec, NestedTable, NestedTableAdapter, NestedTableKind,
    ValueKind,
};
use crate::error::{Error, Result};
use crate::record::Record;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};

/// A dialogue response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    pub id: String,
    pub topic: String,
    pub response: String,
    /// Script run after the response is shown
    pub result_script: String,
}

impl Info {
    pub fn new(id: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
            ..Self::default()
        }
    }
}

const SCRIPT_COLUMNS: &[ColumnSpec] = &[ColumnSpec::new("Script", ValueKind::String)];

/// Exposes `Info::result_script` as a table fixed at one row and one column
#[derive(Debug, Clone, Copy, Default)]
pub struct InfoScriptAdapter;

impl InfoScriptAdapter {
    fn unsupported(&self, operation: &'static str) -> Error {
        Error::Unsupported {
            table: self.kind(),
            operation,
        }
    }
}

impl NestedTableAdapter<Info> for InfoScriptAdapter {
    fn kind(&self) -> NestedTableKind {
        NestedTableKind::InfoResultScript
    }

    fn column_specs(&self) -> &'static [ColumnSpec] {
        SCRIPT_COLUMNS
    }

    fn add_row(&self, _record: &mut Record<Info>, _position: usize) -> Result<()> {
        Err(self.unsupported("adding a row"))
    }

    fn remove_row(&self, _record: &mut Record<Info>, _position: usize) -> Result<()> {
        Err(self.unsupported("removing a row"))
    }

    fn set_table(&self, _record: &mut Record<Info>, _table: NestedTable) -> Result<()> {
        Err(self.unsupported("replacing the table"))
    }

    fn table(&self, _record: &Record<Info>) -> Result<NestedTable> {
        Err(self.unsupported("copying the table"))
    }

    fn get_data(&self, record: &Record<Info>, row: usize, column: usize) -> Result<CellValue> {
        check_row(row, 1)?;
        match column {
            0 => Ok(record.get().result_script.as_str().into()),
            _ => Err(invalid_column(self.kind(), SCRIPT_COLUMNS, column)),
        }
    }

    fn set_data(
        &self,
        record: &mut Record<Info>,
        value: &CellValue,
        row: usize,
        column: usize,
    ) -> Result<()> {
        check_row(row, 1)?;
        if column != 0 {
            return Err(invalid_column(self.kind(), SCRIPT_COLUMNS, column));
        }

        let mut info = record.get().clone();
        info.result_script = value.to_text();
        record.commit(info, &[self.kind()]);
        Ok(())
    }

    fn rows_count(&self, _record: &Record<Info>) -> usize {
        1
    }
}
