//! Workbook reading.
//!
//! Converts the first worksheet of an `.xlsx` workbook into a
//! [`SheetGrid`] using the `calamine` crate. This is the grid-producing
//! collaborator; everything downstream works purely off the grid and never
//! touches the file again.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{CellValue, SheetGrid};

/// Reads the first worksheet of the workbook at `path` into a grid.
///
/// Cell positions are preserved absolutely: calamine ranges start at the
/// first used cell, so the grid is padded back out to worksheet origin.
/// A missing file, an unreadable workbook, and a workbook with no sheets
/// are the fatal failures here.
pub fn load_workbook<P: AsRef<Path>>(path: P) -> EngineResult<SheetGrid> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    if !path.exists() {
        return Err(EngineError::InputNotFound { path: path_str });
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|e| EngineError::InputReadError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| EngineError::EmptyWorkbook {
            path: path_str.clone(),
        })?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| EngineError::InputReadError {
            path: path_str,
            message: e.to_string(),
        })?;

    tracing::debug!(sheet = %sheet_name, rows = range.height(), "loaded worksheet");

    Ok(grid_from_range(&range))
}

/// Re-anchors a calamine range at worksheet origin and converts its cells.
fn grid_from_range(range: &Range<Data>) -> SheetGrid {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    let mut cells: Vec<Vec<Option<CellValue>>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut grid_row: Vec<Option<CellValue>> = vec![None; start_col as usize];
        grid_row.extend(row.iter().map(convert_cell));
        cells.push(grid_row);
    }

    SheetGrid::new(cells)
}

/// Maps one calamine cell onto the engine's cell model.
///
/// Whitespace-only strings count as blank, matching how the source export
/// pads its layout. Error cells are blank too; the positional extractors
/// treat anything unusable the same way.
fn convert_cell(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            if s.trim().is_empty() {
                None
            } else {
                Some(CellValue::Text(s.clone()))
            }
        }
        Data::Float(f) => Decimal::from_f64_retain(*f).map(CellValue::Number),
        Data::Int(i) => Some(CellValue::Number(Decimal::from(*i))),
        Data::Bool(b) => Some(CellValue::Text(b.to_string())),
        Data::DateTime(dt) => Decimal::from_f64_retain(dt.as_f64()).map(CellValue::Number),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_convert_empty_and_error_cells_are_blank() {
        assert_eq!(convert_cell(&Data::Empty), None);
        assert_eq!(
            convert_cell(&Data::Error(calamine::CellErrorType::Div0)),
            None
        );
    }

    #[test]
    fn test_convert_whitespace_string_is_blank() {
        assert_eq!(convert_cell(&Data::String("   ".to_string())), None);
    }

    #[test]
    fn test_convert_string_cell() {
        assert_eq!(
            convert_cell(&Data::String("Employee Tot:".to_string())),
            Some(CellValue::Text("Employee Tot:".to_string()))
        );
    }

    #[test]
    fn test_convert_numeric_cells() {
        assert_eq!(
            convert_cell(&Data::Float(1234.56)),
            Some(CellValue::Number(dec("1234.56")))
        );
        assert_eq!(
            convert_cell(&Data::Int(693133)),
            Some(CellValue::Number(dec("693133")))
        );
    }

    #[test]
    fn test_convert_nan_float_is_blank() {
        assert_eq!(convert_cell(&Data::Float(f64::NAN)), None);
    }

    #[test]
    fn test_grid_preserves_absolute_positions() {
        // A range starting at C3 (row 2, col 2) must not shift cells.
        let mut range: Range<Data> = Range::new((2, 2), (3, 4));
        range.set_value((2, 2), Data::String("Grand Tot:".to_string()));
        range.set_value((3, 4), Data::Float(42.0));

        let grid = grid_from_range(&range);
        assert_eq!(grid.text(2, 2), Some("Grand Tot:"));
        assert_eq!(grid.number(3, 4), Some(dec("42.00")));
        assert_eq!(grid.value(0, 0), None);
        assert_eq!(grid.value(2, 0), None);
    }

    #[test]
    fn test_load_missing_file_returns_input_not_found() {
        match load_workbook("/nonexistent/payroll.xlsx") {
            Err(EngineError::InputNotFound { path }) => {
                assert!(path.contains("payroll.xlsx"));
            }
            other => panic!("Expected InputNotFound, got {:?}", other),
        }
    }
}
