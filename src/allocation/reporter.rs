//! Aggregation and reconciliation reporting.
//!
//! Employee allocations are folded into the per-program accumulators with
//! an explicit reducer, then compared against the spreadsheet-stated grand
//! totals. The comparison is read-only: divergence is surfaced for human
//! review, never corrected.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::OverrideConfig;
use crate::error::EngineResult;
use crate::extract::{DepartmentIndex, extract_employees, extract_grand_totals};
use crate::models::{
    ComparisonLine, Diagnostic, Employee, GrandTotals, ProgramAccumulators, ProgramNetLine,
    ProgramTaxLine, ReconciliationReport, SheetGrid,
};

use super::allocator::{EmployeeAllocation, allocate_employee};
use super::mapping::build_program_buckets;

/// Folds one employee allocation into the per-program accumulators.
///
/// A pure reducer: the returned accumulators are the inputs plus the
/// allocation's buckets, and nothing else is touched. Aggregation over a
/// run is `allocations.fold(ProgramAccumulators::new(), accumulate)`.
pub fn accumulate(
    mut accumulators: ProgramAccumulators,
    allocation: &EmployeeAllocation,
) -> ProgramAccumulators {
    for line in &allocation.lines {
        accumulators.add(
            line.program,
            line.gross,
            line.employee_tax,
            line.employer_tax,
            line.net,
        );
    }
    accumulators
}

/// Builds the reconciliation report from aggregated totals.
///
/// Calculated gross, deductions, and FUTA are summed over the employee
/// records; calculated taxes and net come from the program accumulators,
/// counting programs with nonzero combined tax (for taxes) and positive
/// net (for net), the same way the figures are presented.
pub fn build_report(
    employees: &[Employee],
    accumulators: &ProgramAccumulators,
    grand: &GrandTotals,
    diagnostics: Vec<Diagnostic>,
) -> ReconciliationReport {
    let calculated_gross: Decimal = employees.iter().map(|e| e.gross_pay).sum();
    let calculated_deductions: Decimal = employees.iter().map(|e| e.deductions).sum();
    let calculated_futa: Decimal = employees.iter().map(|e| e.employer_futa).sum();

    let mut program_taxes = Vec::new();
    let mut calculated_employee_taxes = Decimal::ZERO;
    let mut calculated_employer_taxes = Decimal::ZERO;
    let mut program_net = Vec::new();
    let mut calculated_net = Decimal::ZERO;

    for (program, totals) in accumulators.iter() {
        let combined = totals.employee_tax + totals.employer_tax;
        if combined > Decimal::ZERO {
            calculated_employee_taxes += totals.employee_tax;
            calculated_employer_taxes += totals.employer_tax;
            program_taxes.push(ProgramTaxLine {
                program,
                employee_tax: totals.employee_tax,
                employer_tax: totals.employer_tax,
                combined,
            });
        }
        if totals.net > Decimal::ZERO {
            calculated_net += totals.net;
            program_net.push(ProgramNetLine {
                program,
                net: totals.net,
            });
        }
    }

    ReconciliationReport {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        program_taxes,
        program_net,
        gross: ComparisonLine {
            calculated: calculated_gross,
            stated: grand.gross,
        },
        employee_taxes: ComparisonLine {
            calculated: calculated_employee_taxes,
            stated: grand.employee_taxes,
        },
        employer_taxes_excl_futa: ComparisonLine {
            calculated: calculated_employer_taxes,
            stated: grand.employer_taxes_excl_futa,
        },
        futa: ComparisonLine {
            calculated: calculated_futa,
            stated: grand.futa,
        },
        net: ComparisonLine {
            calculated: calculated_net,
            stated: grand.net,
        },
        deductions: ComparisonLine {
            calculated: calculated_deductions,
            stated: grand.deductions,
        },
        stated_ca_ett: grand.ca_ett,
        bank_debit_total: calculated_employee_taxes + calculated_employer_taxes + grand.ca_ett,
        diagnostics,
    }
}

/// Runs the full reconciliation over one worksheet grid.
///
/// Extraction, mapping, allocation, aggregation, and grand-total
/// comparison, in that order. The only fatal failure past this point is a
/// missing grand-total row; everything else degrades to diagnostics on the
/// report.
pub fn reconcile(
    grid: &SheetGrid,
    overrides: &OverrideConfig,
) -> EngineResult<ReconciliationReport> {
    let departments = DepartmentIndex::build(grid);
    let extraction = extract_employees(grid, &departments);
    let (grand, mut diagnostics) = extract_grand_totals(grid)?;
    diagnostics.extend(extraction.diagnostics.iter().cloned());

    let mut accumulators = ProgramAccumulators::new();
    for employee in &extraction.employees {
        let employee_override = employee.id.and_then(|id| overrides.for_employee(id));
        let (buckets, mapping_diagnostics) =
            build_program_buckets(employee, employee_override);
        diagnostics.extend(mapping_diagnostics);

        let allocation = allocate_employee(employee, &buckets);
        diagnostics.extend(allocation.diagnostics.iter().cloned());
        accumulators = accumulate(accumulators, &allocation);
    }

    tracing::info!(
        employees = extraction.employees.len(),
        diagnostics = diagnostics.len(),
        "reconciliation complete"
    );

    Ok(build_report(
        &extraction.employees,
        &accumulators,
        &grand,
        diagnostics,
    ))
}
