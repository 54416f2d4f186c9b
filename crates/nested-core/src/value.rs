//! Boxed cell values exchanged with the tabular UI

use serde::{Deserialize, Serialize};

/// A single cell as seen by the table view.
///
/// Narrowing into field types is done by the adapters through the lossy
/// `to_*` conversions below, never implicitly by the box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Integer value
    Integer(i64),
    /// String value
    String(String),
}

impl CellValue {
    /// Integer view of the cell. Text that does not parse as an integer yields 0.
    pub fn to_int(&self) -> i64 {
        match self {
            CellValue::Integer(i) => *i,
            CellValue::String(s) => s.trim().parse().unwrap_or(0),
        }
    }

    /// Integer view truncated to 32 bits
    pub fn to_i32(&self) -> i32 {
        self.to_int() as i32
    }

    /// Integer view truncated to 8 unsigned bits (300 becomes 44, -1 becomes 255)
    pub fn to_u8(&self) -> u8 {
        self.to_int() as u8
    }

    /// Text view of the cell
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Integer(i) => i.to_string(),
            CellValue::String(s) => s.clone(),
        }
    }

    /// Check if the cell holds an integer
    pub fn is_integer(&self) -> bool {
        matches!(self, CellValue::Integer(_))
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Integer(i64::from(value))
    }
}

impl From<u8> for CellValue {
    fn from(value: u8) -> Self {
        CellValue::Integer(i64::from(value))
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Integer(value as i64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}
