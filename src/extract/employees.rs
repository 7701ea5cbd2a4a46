//! Employee extraction from the worksheet grid.
//!
//! Scans the name column for employee header rows and walks each employee's
//! block: identity fields from the header, pay-category rows until the
//! employee-total marker, stated totals from the total row, and employer
//! FUTA from the nearest FUTA marker row. All failures here are
//! per-employee diagnostics; extraction always resumes at the next header.

use rust_decimal::Decimal;

use crate::models::{CategoryPay, CellValue, Diagnostic, Employee, SheetGrid};

use super::DepartmentIndex;
use super::layout::{
    DEDUCTIONS_COL, EMPLOYEE_NAME_COL, EMPLOYEE_TOTAL_COL, EMPLOYEE_TOTAL_MARKER,
    EMPLOYER_TAX_COL, FUTA_MARKER, GROSS_PAY_COL, HOURS_COL, IDENTIFIER_COL, MAX_LABEL_LOOKAHEAD,
    NET_PAY_COL, TAXES_COL, TAX_MARKER_COL, normalize_label,
};

/// The outcome of scanning the whole grid for employees.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Every employee with positive gross pay, in worksheet order.
    pub employees: Vec<Employee>,
    /// Every nonfatal condition encountered while scanning.
    pub diagnostics: Vec<Diagnostic>,
}

/// Scans the name column for employee headers and extracts one [`Employee`]
/// per block with positive stated gross pay.
pub fn extract_employees(grid: &SheetGrid, departments: &DepartmentIndex) -> Extraction {
    let mut employees = Vec::new();
    let mut diagnostics = Vec::new();

    for row in 0..grid.row_count() {
        if let Some(name) = grid.text(row, EMPLOYEE_NAME_COL) {
            extract_block(grid, departments, row, name, &mut employees, &mut diagnostics);
        }
    }

    tracing::debug!(
        employees = employees.len(),
        diagnostics = diagnostics.len(),
        "employee extraction finished"
    );

    Extraction {
        employees,
        diagnostics,
    }
}

/// Walks one employee block starting at its header row.
fn extract_block(
    grid: &SheetGrid,
    departments: &DepartmentIndex,
    header_row: usize,
    name: &str,
    employees: &mut Vec<Employee>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let id = leading_integer(grid.value(header_row, IDENTIFIER_COL));

    let net_pay = match grid.number(header_row + 1, NET_PAY_COL) {
        Some(net) => net,
        None => {
            diagnostics.push(Diagnostic::MissingNetPay {
                employee: name.to_string(),
            });
            Decimal::ZERO
        }
    };

    let default_department = departments
        .department_at(header_row)
        .unwrap_or_default()
        .to_string();

    let employer_futa = match find_futa(grid, header_row) {
        Some(futa) => futa,
        None => {
            diagnostics.push(Diagnostic::MissingFutaMarker {
                employee: name.to_string(),
            });
            Decimal::ZERO
        }
    };

    // Category labels drift below their pay amounts when an employee has
    // few categories; the skew persists for the rest of the block.
    let mut label_offset = 0usize;
    let mut categories: Vec<CategoryPay> = Vec::new();

    // The first pay-category row sits two rows below the header.
    for row in (header_row + 2)..grid.row_count() {
        let gross = grid.number(row, GROSS_PAY_COL);
        let hours = grid.number(row, HOURS_COL);

        if gross.is_some() || hours.is_some() {
            match probe_label(grid, row, &mut label_offset) {
                None => diagnostics.push(Diagnostic::LabelProbeExhausted {
                    employee: name.to_string(),
                    row,
                }),
                Some(label) => match (gross, hours) {
                    (Some(amount), _) => categories.push(CategoryPay { label, amount }),
                    (None, Some(hours)) => diagnostics.push(Diagnostic::HoursWithoutPay {
                        employee: name.to_string(),
                        category: label,
                        hours,
                    }),
                    (None, None) => unreachable!("row tested non-blank above"),
                },
            }
        }

        // The total row is the row after the last pay-category row.
        if grid.has_marker(row + 1, EMPLOYEE_TOTAL_COL, EMPLOYEE_TOTAL_MARKER) {
            emit_employee(
                grid,
                row + 1,
                name,
                id,
                net_pay,
                default_department,
                employer_futa,
                categories,
                employees,
                diagnostics,
            );
            return;
        }
    }

    diagnostics.push(Diagnostic::TotalRowNotFound {
        employee: name.to_string(),
    });
}

/// Reads the stated totals off the employee-total row and emits the
/// employee, or a `NoEarnings` diagnostic when gross is absent or zero.
#[allow(clippy::too_many_arguments)]
fn emit_employee(
    grid: &SheetGrid,
    total_row: usize,
    name: &str,
    id: Option<u64>,
    net_pay: Decimal,
    default_department: String,
    employer_futa: Decimal,
    categories: Vec<CategoryPay>,
    employees: &mut Vec<Employee>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let gross_pay = grid.number(total_row, GROSS_PAY_COL).unwrap_or_default();
    if gross_pay <= Decimal::ZERO {
        diagnostics.push(Diagnostic::NoEarnings {
            employee: name.to_string(),
        });
        return;
    }

    let employee_taxes = grid.number(total_row, TAXES_COL).unwrap_or_default();
    let deductions = grid.number(total_row, DEDUCTIONS_COL).unwrap_or_default();
    // FUTA is billed separately, so it is carved out of the employer total
    // here and tracked on its own.
    let employer_taxes_excl_futa =
        grid.number(total_row, EMPLOYER_TAX_COL).unwrap_or_default() - employer_futa;

    let employee = Employee {
        id,
        name: name.to_string(),
        net_pay,
        default_department,
        categories,
        gross_pay,
        employee_taxes,
        deductions,
        employer_taxes_excl_futa,
        employer_futa,
    };

    let rate = employee.effective_tax_rate();
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        diagnostics.push(Diagnostic::TaxRateAnomaly {
            employee: name.to_string(),
            rate,
        });
    }

    employees.push(employee);
}

/// Finds the employer FUTA amount on the first FUTA marker row at or below
/// the employee's header row.
fn find_futa(grid: &SheetGrid, header_row: usize) -> Option<Decimal> {
    for row in header_row..grid.row_count() {
        if grid.has_marker(row, TAX_MARKER_COL, FUTA_MARKER) {
            return Some(grid.number(row, EMPLOYER_TAX_COL).unwrap_or_default());
        }
    }
    None
}

/// Resolves the category label for a pay row, walking the identifier column
/// forward through blank cells.
///
/// The skew accumulates across the employee's rows; an exhausted probe
/// restores the skew it started with so one orphaned amount does not
/// derail the rest of the block.
fn probe_label(grid: &SheetGrid, row: usize, label_offset: &mut usize) -> Option<String> {
    let saved = *label_offset;
    for _ in 0..=MAX_LABEL_LOOKAHEAD {
        match grid.value(row + *label_offset, IDENTIFIER_COL) {
            Some(CellValue::Text(s)) => return Some(normalize_label(s)),
            Some(CellValue::Number(d)) => return Some(normalize_label(&d.to_string())),
            None => *label_offset += 1,
        }
    }
    *label_offset = saved;
    None
}

/// Extracts the first contiguous digit run from the cell as a number.
fn leading_integer(cell: Option<&CellValue>) -> Option<u64> {
    let raw = match cell? {
        CellValue::Text(s) => s.clone(),
        CellValue::Number(d) => d.to_string(),
    };
    let digits: String = raw
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::layout::DEPARTMENT_TITLE_COL;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Builds grids cell by cell for extraction scenarios.
    struct GridBuilder {
        rows: Vec<Vec<Option<CellValue>>>,
    }

    impl GridBuilder {
        fn new() -> Self {
            Self { rows: Vec::new() }
        }

        fn set(&mut self, row: usize, col: usize, value: CellValue) -> &mut Self {
            if self.rows.len() <= row {
                self.rows.resize(row + 1, Vec::new());
            }
            if self.rows[row].len() <= col {
                self.rows[row].resize(col + 1, None);
            }
            self.rows[row][col] = Some(value);
            self
        }

        fn text(&mut self, row: usize, col: usize, s: &str) -> &mut Self {
            self.set(row, col, CellValue::Text(s.to_string()))
        }

        fn num(&mut self, row: usize, col: usize, s: &str) -> &mut Self {
            self.set(row, col, CellValue::Number(dec(s)))
        }

        fn build(&mut self) -> SheetGrid {
            SheetGrid::new(std::mem::take(&mut self.rows))
        }
    }

    /// One employee block: header at `row`, two categories, total row,
    /// FUTA row.
    fn standard_block(builder: &mut GridBuilder, row: usize, name: &str, id: &str) {
        builder
            .text(row, EMPLOYEE_NAME_COL, name)
            .text(row, IDENTIFIER_COL, id)
            .num(row + 1, NET_PAY_COL, "480.00")
            // categories
            .text(row + 2, IDENTIFIER_COL, "Swim")
            .num(row + 2, HOURS_COL, "20.00")
            .num(row + 2, GROSS_PAY_COL, "500.00")
            .text(row + 3, IDENTIFIER_COL, "Manage")
            .num(row + 3, HOURS_COL, "4.00")
            .num(row + 3, GROSS_PAY_COL, "100.00")
            // total row
            .text(row + 4, EMPLOYEE_TOTAL_COL, "Employee Tot:")
            .num(row + 4, GROSS_PAY_COL, "600.00")
            .num(row + 4, TAXES_COL, "100.00")
            .num(row + 4, DEDUCTIONS_COL, "20.00")
            .num(row + 4, EMPLOYER_TAX_COL, "43.60")
            // FUTA row
            .text(row + 5, TAX_MARKER_COL, "FUTA")
            .num(row + 5, EMPLOYER_TAX_COL, "3.60");
    }

    fn extract(grid: &SheetGrid) -> Extraction {
        let departments = DepartmentIndex::build(grid);
        extract_employees(grid, &departments)
    }

    #[test]
    fn test_extracts_identity_and_totals() {
        let mut builder = GridBuilder::new();
        builder.text(0, DEPARTMENT_TITLE_COL, "Swim");
        standard_block(&mut builder, 1, "ALEX P RIVERA", "441210 hourly");
        let result = extract(&builder.build());

        assert_eq!(result.diagnostics, vec![]);
        assert_eq!(result.employees.len(), 1);
        let employee = &result.employees[0];
        assert_eq!(employee.name, "ALEX P RIVERA");
        assert_eq!(employee.id, Some(441210));
        assert_eq!(employee.net_pay, dec("480.00"));
        assert_eq!(employee.default_department, "Swim");
        assert_eq!(employee.gross_pay, dec("600.00"));
        assert_eq!(employee.employee_taxes, dec("100.00"));
        assert_eq!(employee.deductions, dec("20.00"));
        assert_eq!(employee.employer_futa, dec("3.60"));
        // 43.60 stated employer tax minus 3.60 FUTA
        assert_eq!(employee.employer_taxes_excl_futa, dec("40.00"));
    }

    #[test]
    fn test_categories_in_worksheet_order() {
        let mut builder = GridBuilder::new();
        standard_block(&mut builder, 0, "ALEX P RIVERA", "441210");
        let result = extract(&builder.build());

        let employee = &result.employees[0];
        assert_eq!(
            employee.categories,
            vec![
                CategoryPay {
                    label: "Swim".to_string(),
                    amount: dec("500.00"),
                },
                CategoryPay {
                    label: "Manage".to_string(),
                    amount: dec("100.00"),
                },
            ]
        );
    }

    #[test]
    fn test_numeric_id_cell_is_accepted() {
        let mut builder = GridBuilder::new();
        standard_block(&mut builder, 0, "ALEX P RIVERA", "ignored");
        builder.num(0, IDENTIFIER_COL, "441210");
        let result = extract(&builder.build());
        assert_eq!(result.employees[0].id, Some(441210));
    }

    #[test]
    fn test_missing_id_yields_none() {
        let mut builder = GridBuilder::new();
        standard_block(&mut builder, 0, "ALEX P RIVERA", "no digits here");
        let result = extract(&builder.build());
        assert_eq!(result.employees[0].id, None);
    }

    #[test]
    fn test_bonus_only_category_has_no_hours() {
        let mut builder = GridBuilder::new();
        builder
            .text(0, EMPLOYEE_NAME_COL, "ALEX P RIVERA")
            .num(1, NET_PAY_COL, "90.00")
            .text(2, IDENTIFIER_COL, "Bonus")
            .num(2, GROSS_PAY_COL, "100.00")
            .text(3, EMPLOYEE_TOTAL_COL, "Employee Tot:")
            .num(3, GROSS_PAY_COL, "100.00")
            .num(3, TAXES_COL, "10.00")
            .num(3, EMPLOYER_TAX_COL, "1.00")
            .text(4, TAX_MARKER_COL, "FUTA")
            .num(4, EMPLOYER_TAX_COL, "0.60");
        let result = extract(&builder.build());

        assert_eq!(result.employees[0].categories.len(), 1);
        assert_eq!(result.employees[0].categories[0].label, "Bonus");
    }

    #[test]
    fn test_hours_without_pay_is_flagged_and_not_recorded() {
        let mut builder = GridBuilder::new();
        builder
            .text(0, EMPLOYEE_NAME_COL, "ALEX P RIVERA")
            .num(1, NET_PAY_COL, "480.00")
            .text(2, IDENTIFIER_COL, "Swim")
            .num(2, HOURS_COL, "20.00")
            .num(2, GROSS_PAY_COL, "600.00")
            .text(3, IDENTIFIER_COL, "Dance")
            .num(3, HOURS_COL, "3.50")
            .text(4, EMPLOYEE_TOTAL_COL, "Employee Tot:")
            .num(4, GROSS_PAY_COL, "600.00")
            .num(4, TAXES_COL, "100.00")
            .num(4, EMPLOYER_TAX_COL, "40.00")
            .text(5, TAX_MARKER_COL, "FUTA")
            .num(5, EMPLOYER_TAX_COL, "3.60");
        let result = extract(&builder.build());

        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::HoursWithoutPay {
                employee: "ALEX P RIVERA".to_string(),
                category: "Dance".to_string(),
                hours: dec("3.50"),
            }]
        );
        let labels: Vec<&str> = result.employees[0]
            .categories
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Swim"]);
    }

    #[test]
    fn test_label_probe_tolerates_downward_drift() {
        // The label sits two rows below its pay amount; the skew persists
        // for the following category row.
        let mut builder = GridBuilder::new();
        builder
            .text(0, EMPLOYEE_NAME_COL, "ALEX P RIVERA")
            .num(1, NET_PAY_COL, "480.00")
            .num(2, GROSS_PAY_COL, "500.00")
            .num(3, GROSS_PAY_COL, "100.00")
            .text(4, IDENTIFIER_COL, "Swim")
            .text(5, IDENTIFIER_COL, "Manage")
            .text(4, EMPLOYEE_TOTAL_COL, "Employee Tot:")
            .num(4, GROSS_PAY_COL, "600.00")
            .num(4, TAXES_COL, "100.00")
            .num(4, EMPLOYER_TAX_COL, "40.00")
            .text(6, TAX_MARKER_COL, "FUTA")
            .num(6, EMPLOYER_TAX_COL, "3.60");
        let result = extract(&builder.build());

        let employee = &result.employees[0];
        let labels: Vec<&str> = employee.categories.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Swim", "Manage"]);
    }

    #[test]
    fn test_label_probe_exhaustion_skips_the_row() {
        // No label anywhere in the identifier column below the pay row.
        let mut builder = GridBuilder::new();
        builder
            .text(0, EMPLOYEE_NAME_COL, "ALEX P RIVERA")
            .num(1, NET_PAY_COL, "480.00")
            .num(2, GROSS_PAY_COL, "600.00")
            .text(3, EMPLOYEE_TOTAL_COL, "Employee Tot:")
            .num(3, GROSS_PAY_COL, "600.00")
            .num(3, TAXES_COL, "100.00")
            .num(3, EMPLOYER_TAX_COL, "40.00")
            .text(4, TAX_MARKER_COL, "FUTA")
            .num(4, EMPLOYER_TAX_COL, "3.60");
        let result = extract(&builder.build());

        assert!(result.diagnostics.contains(&Diagnostic::LabelProbeExhausted {
            employee: "ALEX P RIVERA".to_string(),
            row: 2,
        }));
        assert!(result.employees[0].categories.is_empty());
    }

    #[test]
    fn test_zero_gross_block_is_skipped_with_no_earnings() {
        let mut builder = GridBuilder::new();
        builder
            .text(0, EMPLOYEE_NAME_COL, "ALEX P RIVERA")
            .num(1, NET_PAY_COL, "0.00")
            .text(2, IDENTIFIER_COL, "Swim")
            .num(2, HOURS_COL, "0.00")
            .num(2, GROSS_PAY_COL, "0.00")
            .text(3, EMPLOYEE_TOTAL_COL, "Employee Tot:")
            .num(3, GROSS_PAY_COL, "0.00")
            .text(4, TAX_MARKER_COL, "FUTA")
            .num(4, EMPLOYER_TAX_COL, "0.00");
        let result = extract(&builder.build());

        assert!(result.employees.is_empty());
        assert!(result.diagnostics.contains(&Diagnostic::NoEarnings {
            employee: "ALEX P RIVERA".to_string(),
        }));
    }

    #[test]
    fn test_missing_total_row_is_flagged() {
        let mut builder = GridBuilder::new();
        builder
            .text(0, EMPLOYEE_NAME_COL, "ALEX P RIVERA")
            .num(1, NET_PAY_COL, "480.00")
            .text(2, IDENTIFIER_COL, "Swim")
            .num(2, GROSS_PAY_COL, "600.00")
            .text(3, TAX_MARKER_COL, "FUTA")
            .num(3, EMPLOYER_TAX_COL, "3.60");
        let result = extract(&builder.build());

        assert!(result.employees.is_empty());
        assert!(result.diagnostics.contains(&Diagnostic::TotalRowNotFound {
            employee: "ALEX P RIVERA".to_string(),
        }));
    }

    #[test]
    fn test_missing_net_pay_reads_as_zero_with_diagnostic() {
        let mut builder = GridBuilder::new();
        standard_block(&mut builder, 0, "ALEX P RIVERA", "441210");
        builder.rows[1][NET_PAY_COL] = None;
        let result = extract(&builder.build());

        assert!(result.diagnostics.contains(&Diagnostic::MissingNetPay {
            employee: "ALEX P RIVERA".to_string(),
        }));
        assert_eq!(result.employees[0].net_pay, Decimal::ZERO);
    }

    #[test]
    fn test_missing_futa_marker_reads_as_zero_with_diagnostic() {
        let mut builder = GridBuilder::new();
        builder
            .text(0, EMPLOYEE_NAME_COL, "ALEX P RIVERA")
            .num(1, NET_PAY_COL, "480.00")
            .text(2, IDENTIFIER_COL, "Swim")
            .num(2, GROSS_PAY_COL, "600.00")
            .text(3, EMPLOYEE_TOTAL_COL, "Employee Tot:")
            .num(3, GROSS_PAY_COL, "600.00")
            .num(3, TAXES_COL, "100.00")
            .num(3, EMPLOYER_TAX_COL, "40.00");
        let result = extract(&builder.build());

        assert!(result.diagnostics.contains(&Diagnostic::MissingFutaMarker {
            employee: "ALEX P RIVERA".to_string(),
        }));
        let employee = &result.employees[0];
        assert_eq!(employee.employer_futa, Decimal::ZERO);
        assert_eq!(employee.employer_taxes_excl_futa, dec("40.00"));
    }

    #[test]
    fn test_anomalous_tax_rate_is_flagged_not_clamped() {
        // Net above gross drives the rate negative.
        let mut builder = GridBuilder::new();
        standard_block(&mut builder, 0, "ALEX P RIVERA", "441210");
        builder.num(1, NET_PAY_COL, "700.00");
        let result = extract(&builder.build());

        assert_eq!(result.employees.len(), 1);
        assert!(matches!(
            result.diagnostics.as_slice(),
            [Diagnostic::TaxRateAnomaly { employee, rate }]
                if employee == "ALEX P RIVERA" && *rate < Decimal::ZERO
        ));
    }

    #[test]
    fn test_multiple_employees_extract_in_order() {
        let mut builder = GridBuilder::new();
        builder.text(0, DEPARTMENT_TITLE_COL, "Swim");
        standard_block(&mut builder, 1, "ALEX P RIVERA", "441210");
        builder.text(8, DEPARTMENT_TITLE_COL, "Dance");
        standard_block(&mut builder, 9, "SAM B ORTIZ", "556677");
        let result = extract(&builder.build());

        assert_eq!(result.employees.len(), 2);
        assert_eq!(result.employees[0].name, "ALEX P RIVERA");
        assert_eq!(result.employees[0].default_department, "Swim");
        assert_eq!(result.employees[1].name, "SAM B ORTIZ");
        assert_eq!(result.employees[1].default_department, "Dance");
    }

    #[test]
    fn test_alias_labels_are_normalized() {
        let mut builder = GridBuilder::new();
        builder
            .text(0, EMPLOYEE_NAME_COL, "ALEX P RIVERA")
            .num(1, NET_PAY_COL, "90.00")
            .text(2, IDENTIFIER_COL, "Polka Dots AM")
            .num(2, HOURS_COL, "5.00")
            .num(2, GROSS_PAY_COL, "100.00")
            .text(3, EMPLOYEE_TOTAL_COL, "Employee Tot:")
            .num(3, GROSS_PAY_COL, "100.00")
            .num(3, TAXES_COL, "10.00")
            .num(3, EMPLOYER_TAX_COL, "1.00")
            .text(4, TAX_MARKER_COL, "FUTA")
            .num(4, EMPLOYER_TAX_COL, "0.60");
        let result = extract(&builder.build());

        assert_eq!(result.employees[0].categories[0].label, "Polkadots");
    }
}
