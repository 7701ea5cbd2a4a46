//! Grand-total extraction.
//!
//! The worksheet states its own authoritative totals on a marker row near
//! the bottom. Those values are the reconciliation baseline; they are never
//! fed back into allocation. A missing grand-total row is fatal, since there
//! is nothing to reconcile against; individual missing values degrade
//! to zero with a diagnostic.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Diagnostic, GrandTotals, SheetGrid};

use super::layout::{
    CA_ETT_MARKER, DEDUCTIONS_COL, EMPLOYER_TAX_COL, FUTA_MARKER, GRAND_TOTAL_COL,
    GRAND_TOTAL_MARKER, GROSS_PAY_COL, STATED_NET_COL_OFFSET, STATED_NET_ROW_OFFSET, TAXES_COL,
    TAX_MARKER_COL,
};

/// Locates the grand-total marker row and reads the stated totals.
///
/// The stated net sits two rows below the marker at a column offset; FUTA
/// and CA ETT sit on their own marker rows below the grand total, and the
/// scan stops once CA ETT is seen. Stated employer taxes excluding FUTA are
/// derived by subtracting stated FUTA from the employer-tax cell on the
/// marker row.
pub fn extract_grand_totals(grid: &SheetGrid) -> EngineResult<(GrandTotals, Vec<Diagnostic>)> {
    let mut diagnostics = Vec::new();

    let anchor = (0..grid.row_count())
        .find(|&row| grid.has_marker(row, GRAND_TOTAL_COL, GRAND_TOTAL_MARKER))
        .ok_or_else(|| EngineError::GrandTotalNotFound {
            marker: GRAND_TOTAL_MARKER.to_string(),
        })?;

    let mut stated = |value: Option<Decimal>, label: &str| match value {
        Some(v) => v,
        None => {
            diagnostics.push(Diagnostic::StatedValueMissing {
                label: label.to_string(),
            });
            Decimal::ZERO
        }
    };

    let gross = stated(grid.number(anchor, GROSS_PAY_COL), "gross");
    let employee_taxes = stated(grid.number(anchor, TAXES_COL), "employee taxes");
    let deductions = stated(grid.number(anchor, DEDUCTIONS_COL), "deductions");
    let net = stated(
        grid.number(
            anchor + STATED_NET_ROW_OFFSET,
            GROSS_PAY_COL + STATED_NET_COL_OFFSET,
        ),
        "net",
    );
    let employer_taxes = stated(grid.number(anchor, EMPLOYER_TAX_COL), "employer taxes");

    let mut futa = None;
    let mut ca_ett = None;
    for row in anchor..grid.row_count() {
        if grid.has_marker(row, TAX_MARKER_COL, FUTA_MARKER) {
            futa = Some(grid.number(row, EMPLOYER_TAX_COL).unwrap_or_default());
        }
        if grid.has_marker(row, TAX_MARKER_COL, CA_ETT_MARKER) {
            ca_ett = Some(grid.number(row, EMPLOYER_TAX_COL).unwrap_or_default());
            break;
        }
    }
    let futa = stated(futa, "FUTA");
    let ca_ett = stated(ca_ett, "CA ETT");

    tracing::debug!(row = anchor, %gross, %net, "located grand total row");

    Ok((
        GrandTotals {
            gross,
            employee_taxes,
            deductions,
            net,
            employer_taxes_excl_futa: employer_taxes - futa,
            futa,
            ca_ett,
        },
        diagnostics,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn set(rows: &mut Vec<Vec<Option<CellValue>>>, row: usize, col: usize, value: CellValue) {
        if rows.len() <= row {
            rows.resize(row + 1, Vec::new());
        }
        if rows[row].len() <= col {
            rows[row].resize(col + 1, None);
        }
        rows[row][col] = Some(value);
    }

    fn text(rows: &mut Vec<Vec<Option<CellValue>>>, row: usize, col: usize, s: &str) {
        set(rows, row, col, CellValue::Text(s.to_string()));
    }

    fn num(rows: &mut Vec<Vec<Option<CellValue>>>, row: usize, col: usize, s: &str) {
        set(rows, row, col, CellValue::Number(dec(s)));
    }

    fn standard_grand_total_rows() -> Vec<Vec<Option<CellValue>>> {
        let mut rows = Vec::new();
        text(&mut rows, 40, GRAND_TOTAL_COL, "Grand Tot:");
        num(&mut rows, 40, GROSS_PAY_COL, "100000.00");
        num(&mut rows, 40, TAXES_COL, "18000.00");
        num(&mut rows, 40, DEDUCTIONS_COL, "5000.00");
        num(&mut rows, 40, EMPLOYER_TAX_COL, "7240.00");
        num(
            &mut rows,
            40 + STATED_NET_ROW_OFFSET,
            GROSS_PAY_COL + STATED_NET_COL_OFFSET,
            "77000.00",
        );
        text(&mut rows, 44, TAX_MARKER_COL, "FUTA");
        num(&mut rows, 44, EMPLOYER_TAX_COL, "240.00");
        text(&mut rows, 45, TAX_MARKER_COL, "CA ETT");
        num(&mut rows, 45, EMPLOYER_TAX_COL, "52.00");
        rows
    }

    #[test]
    fn test_extracts_all_stated_values() {
        let grid = SheetGrid::new(standard_grand_total_rows());
        let (totals, diagnostics) = extract_grand_totals(&grid).unwrap();

        assert_eq!(diagnostics, vec![]);
        assert_eq!(totals.gross, dec("100000.00"));
        assert_eq!(totals.employee_taxes, dec("18000.00"));
        assert_eq!(totals.deductions, dec("5000.00"));
        assert_eq!(totals.net, dec("77000.00"));
        assert_eq!(totals.futa, dec("240.00"));
        assert_eq!(totals.ca_ett, dec("52.00"));
        // 7240.00 on the marker row minus 240.00 FUTA
        assert_eq!(totals.employer_taxes_excl_futa, dec("7000.00"));
    }

    #[test]
    fn test_missing_marker_is_fatal() {
        let grid = SheetGrid::new(vec![vec![None; 50]; 10]);
        match extract_grand_totals(&grid) {
            Err(EngineError::GrandTotalNotFound { marker }) => {
                assert_eq!(marker, "Grand Tot:");
            }
            other => panic!("Expected GrandTotalNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_ca_ett_degrades_to_zero_with_diagnostic() {
        let mut rows = standard_grand_total_rows();
        rows[45].clear();
        let grid = SheetGrid::new(rows);
        let (totals, diagnostics) = extract_grand_totals(&grid).unwrap();

        assert_eq!(totals.ca_ett, Decimal::ZERO);
        assert!(diagnostics.contains(&Diagnostic::StatedValueMissing {
            label: "CA ETT".to_string(),
        }));
    }

    #[test]
    fn test_missing_futa_degrades_to_zero_with_diagnostic() {
        let mut rows = standard_grand_total_rows();
        rows[44].clear();
        let grid = SheetGrid::new(rows);
        let (totals, diagnostics) = extract_grand_totals(&grid).unwrap();

        assert_eq!(totals.futa, Decimal::ZERO);
        // With no FUTA to subtract, the employer figure is the raw cell.
        assert_eq!(totals.employer_taxes_excl_futa, dec("7240.00"));
        assert!(diagnostics.contains(&Diagnostic::StatedValueMissing {
            label: "FUTA".to_string(),
        }));
    }

    #[test]
    fn test_last_futa_before_ca_ett_wins() {
        let mut rows = standard_grand_total_rows();
        // A second FUTA marker row between the first and CA ETT.
        text(&mut rows, 46, TAX_MARKER_COL, "FUTA");
        num(&mut rows, 46, EMPLOYER_TAX_COL, "999.00");
        // Move CA ETT below it.
        rows[45].clear();
        text(&mut rows, 47, TAX_MARKER_COL, "CA ETT");
        num(&mut rows, 47, EMPLOYER_TAX_COL, "52.00");
        let grid = SheetGrid::new(rows);
        let (totals, _) = extract_grand_totals(&grid).unwrap();

        assert_eq!(totals.futa, dec("999.00"));
    }

    #[test]
    fn test_first_marker_row_anchors_extraction() {
        let mut rows = standard_grand_total_rows();
        // A later stray marker must not win.
        text(&mut rows, 50, GRAND_TOTAL_COL, "Grand Tot:");
        num(&mut rows, 50, GROSS_PAY_COL, "1.00");
        let grid = SheetGrid::new(rows);
        let (totals, _) = extract_grand_totals(&grid).unwrap();

        assert_eq!(totals.gross, dec("100000.00"));
    }

    #[test]
    fn test_missing_stated_gross_degrades_to_zero() {
        let mut rows = standard_grand_total_rows();
        rows[40][GROSS_PAY_COL] = None;
        let grid = SheetGrid::new(rows);
        let (totals, diagnostics) = extract_grand_totals(&grid).unwrap();

        assert_eq!(totals.gross, Decimal::ZERO);
        assert!(diagnostics.contains(&Diagnostic::StatedValueMissing {
            label: "gross".to_string(),
        }));
    }
}
