//! Cell grid model and typed accessor.
//!
//! The payroll worksheet is represented as an immutable, row-major grid of
//! optional typed cells. There is no schema and no header row; all structure
//! comes from fixed column positions and textual marker cells, so the only
//! contract this type offers is typed lookup by `(row, column)` with blank
//! and unparseable cells collapsing to `None`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single typed worksheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// A textual cell (markers, names, category labels).
    Text(String),
    /// A numeric cell (amounts, hours).
    Number(Decimal),
}

/// An immutable 2-D grid of optional typed cells, addressed by (row, column).
///
/// # Example
///
/// ```
/// use payroll_recon::models::{CellValue, SheetGrid};
/// use rust_decimal::Decimal;
///
/// let grid = SheetGrid::new(vec![vec![
///     Some(CellValue::Text("Grand Tot:".to_string())),
///     Some(CellValue::Number(Decimal::new(123456, 2))),
/// ]]);
/// assert_eq!(grid.text(0, 0), Some("Grand Tot:"));
/// assert_eq!(grid.number(0, 1), Some(Decimal::new(123456, 2)));
/// assert_eq!(grid.number(5, 5), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetGrid {
    cells: Vec<Vec<Option<CellValue>>>,
}

impl SheetGrid {
    /// Creates a grid from row-major cell data.
    pub fn new(cells: Vec<Vec<Option<CellValue>>>) -> Self {
        Self { cells }
    }

    /// Returns the number of rows in the grid.
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the raw cell at the given position, if present and non-blank.
    pub fn value(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.cells.get(row)?.get(col)?.as_ref()
    }

    /// Returns the text content of the cell, or `None` for blank or numeric
    /// cells.
    pub fn text(&self, row: usize, col: usize) -> Option<&str> {
        match self.value(row, col) {
            Some(CellValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the numeric content of the cell normalized to cents.
    ///
    /// Numeric cells are rounded to 2 decimal places. Text cells have
    /// thousands separators stripped and are then parsed and rounded the
    /// same way. Blank, out-of-range, and unparseable cells return `None`;
    /// this accessor never fails.
    pub fn number(&self, row: usize, col: usize) -> Option<Decimal> {
        match self.value(row, col)? {
            CellValue::Number(d) => Some(d.round_dp(2)),
            CellValue::Text(s) => {
                let cleaned = s.replace(',', "");
                cleaned.trim().parse::<Decimal>().ok().map(|d| d.round_dp(2))
            }
        }
    }

    /// Returns true if the cell is non-blank (text or numeric).
    pub fn is_present(&self, row: usize, col: usize) -> bool {
        self.value(row, col).is_some()
    }

    /// Returns true if the cell's text contains the given marker.
    ///
    /// Marker detection is deliberately substring-based: the worksheet has
    /// no schema, and marker cells carry surrounding whitespace and
    /// punctuation that vary between exports.
    pub fn has_marker(&self, row: usize, col: usize, marker: &str) -> bool {
        self.text(row, col).is_some_and(|s| s.contains(marker))
    }
}
