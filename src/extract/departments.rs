//! Department index built from the department-title column.
//!
//! Department titles appear once, at the row where that department's
//! employee blocks begin. An employee's default department is the last
//! department title at or above the employee's header row.

use crate::models::SheetGrid;

use super::layout::{DEPARTMENT_TITLE_COL, normalize_label};

/// Row-ordered department start positions with normalized names.
///
/// # Example
///
/// ```
/// use payroll_recon::extract::DepartmentIndex;
/// use payroll_recon::models::{CellValue, SheetGrid};
///
/// let mut rows = vec![vec![None; 6]; 10];
/// rows[2][5] = Some(CellValue::Text("Swim".to_string()));
/// rows[7][5] = Some(CellValue::Text("Dance".to_string()));
/// let index = DepartmentIndex::build(&SheetGrid::new(rows));
///
/// assert_eq!(index.department_at(0), None);
/// assert_eq!(index.department_at(4), Some("Swim"));
/// assert_eq!(index.department_at(9), Some("Dance"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentIndex {
    /// (start row, normalized name), strictly increasing in row.
    entries: Vec<(usize, String)>,
}

impl DepartmentIndex {
    /// Scans the department-title column and records each department's
    /// start row. Scanning top to bottom yields entries already ordered by
    /// row; no separate sort is needed.
    pub fn build(grid: &SheetGrid) -> Self {
        let mut entries = Vec::new();
        for row in 0..grid.row_count() {
            if let Some(title) = grid.text(row, DEPARTMENT_TITLE_COL) {
                entries.push((row, normalize_label(title)));
            }
        }
        tracing::debug!(departments = entries.len(), "built department index");
        Self { entries }
    }

    /// Returns the department in effect at the given row: the entry with
    /// the greatest start row ≤ `row`, or `None` if the row precedes every
    /// department.
    pub fn department_at(&self, row: usize) -> Option<&str> {
        let idx = self.entries.partition_point(|(start, _)| *start <= row);
        idx.checked_sub(1).map(|i| self.entries[i].1.as_str())
    }

    /// The number of departments found.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no department titles were found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
