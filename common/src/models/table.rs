//! Generic tabular query result.
//!
//! The query gateway returns every tabular result in this shape; the report
//! layer shapes it into typed DTOs. An empty table is a valid result and is
//! distinct from a failed query (failures additionally raise a notice).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Result of a tabular query.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Table {
    /// Column information, in result order.
    pub columns: Vec<ColumnInfo>,

    /// Row data (each row is a vector of JSON values, one per column).
    pub rows: Vec<Vec<Value>>,

    /// Number of rows returned.
    #[serde(default)]
    pub row_count: usize,
}

/// Column information in a tabular result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,

    /// Column data type as reported by the database.
    pub data_type: String,
}

impl Table {
    /// Creates a new empty table.
    pub fn empty() -> Self {
        Self {
            columns: vec![],
            rows: vec![],
            row_count: 0,
        }
    }

    /// Creates a table from columns and rows.
    pub fn new(columns: Vec<ColumnInfo>, rows: Vec<Vec<Value>>) -> Self {
        let row_count = rows.len();
        Self {
            columns,
            rows,
            row_count,
        }
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Value at (row, column name), if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// String value at (row, column name); null and missing become `None`.
    pub fn str_value(&self, row: usize, column: &str) -> Option<String> {
        self.value(row, column)?.as_str().map(str::to_string)
    }

    /// Integer value at (row, column name), coercing JSON floats.
    pub fn i64_value(&self, row: usize, column: &str) -> Option<i64> {
        let value = self.value(row, column)?;
        value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
    }

    /// Float value at (row, column name), coercing JSON integers.
    pub fn f64_value(&self, row: usize, column: &str) -> Option<f64> {
        self.value(row, column)?.as_f64()
    }

    /// Boolean value at (row, column name).
    pub fn bool_value(&self, row: usize, column: &str) -> Option<bool> {
        self.value(row, column)?.as_bool()
    }
}
