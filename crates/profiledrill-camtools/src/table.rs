//! Cut-list table interchange
//!
//! The spreadsheet reader is an external collaborator; it hands over an
//! ordered table of rows as JSON:
//!
//! ```json
//! { "columns": ["profile", "length_mm", "zijde", "g1"],
//!   "rows": [["P1", 1200, null, null], [null, null, "BOVENKANT Y10", "390@4.3"]] }
//! ```
//!
//! Rows may be ragged; missing trailing cells read as [`CellValue::Empty`].

use crate::error::CamToolResult;
use profiledrill_core::CellValue;
use serde::{Deserialize, Serialize};
use std::io::Read;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Ordered rows over named columns
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CutListTable {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

impl CutListTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row; builder style for tests and small tables.
    pub fn with_row(mut self, row: Vec<CellValue>) -> Self {
        self.rows.push(row);
        self
    }

    pub fn from_json_str(json: &str) -> CamToolResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> CamToolResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Number of columns in the header
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Cell at `row`/`column`, blank when the row is shorter than the header.
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Index of the first column whose trimmed, lower-cased header equals
    /// one of `aliases`. Aliases are tried in order.
    pub fn find_column(&self, aliases: &[&str]) -> Option<usize> {
        let lowered: Vec<String> = self
            .columns
            .iter()
            .map(|c| c.trim().to_lowercase())
            .collect();
        aliases
            .iter()
            .find_map(|alias| lowered.iter().position(|c| c == alias))
    }
}
