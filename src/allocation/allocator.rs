//! Per-employee tax and deduction allocation.
//!
//! Once an employee's categories are consolidated into program buckets, the
//! allocator prorates the employee's taxes across the buckets and consumes
//! the employee's deductions bucket by bucket. Buckets are processed in
//! ascending gross order so deduction exhaustion hits the smallest buckets
//! first and leaves the larger ones intact.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{Diagnostic, Employee, Program};

/// One allocated program bucket for one employee.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramLine {
    /// The program the bucket belongs to.
    pub program: Program,
    /// Gross pay consolidated into the bucket.
    pub gross: Decimal,
    /// Employee tax: bucket gross times the employee's effective rate.
    pub employee_tax: Decimal,
    /// Employer tax (excluding FUTA), prorated by the bucket's share of
    /// the employee's gross.
    pub employer_tax: Decimal,
    /// Net remaining after tax and the bucket's deduction consumption.
    pub net: Decimal,
    /// The deduction amount this bucket absorbed.
    pub deduction_applied: Decimal,
}

/// The allocation of one employee across their program buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeAllocation {
    /// Allocated buckets in the order they were processed (ascending gross).
    pub lines: Vec<ProgramLine>,
    /// Nonfatal conditions encountered during allocation.
    pub diagnostics: Vec<Diagnostic>,
}

/// Allocates one employee's taxes and deductions across program buckets.
///
/// Tax uses the employee's single effective rate per bucket; employer tax
/// is proportional to each bucket's share of total gross. Deductions are
/// consumed sequentially: each bucket's share is the remaining deduction
/// divided by the number of buckets not yet processed, clamped so a
/// bucket's net never goes below zero. A residue left after the last
/// bucket is flagged; it can only happen when deductions exceed the
/// employee's total net.
pub fn allocate_employee(
    employee: &Employee,
    buckets: &BTreeMap<Program, Decimal>,
) -> EmployeeAllocation {
    let mut diagnostics = Vec::new();

    let available_net = employee.gross_pay - employee.employee_taxes;
    if employee.deductions.round_dp(2) > available_net.round_dp(2) {
        diagnostics.push(Diagnostic::DeductionsExceedNet {
            employee: employee.name.clone(),
            deductions: employee.deductions,
            available: available_net,
        });
    }

    // Ascending gross order; ties resolve by program so allocation is
    // deterministic.
    let mut ordered: Vec<(Program, Decimal)> =
        buckets.iter().map(|(p, g)| (*p, *g)).collect();
    ordered.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

    let rate = employee.effective_tax_rate();
    let bucket_count = ordered.len();
    let mut remaining = employee.deductions;
    let mut applied = Decimal::ZERO;
    let mut lines = Vec::with_capacity(bucket_count);

    for (index, (program, gross)) in ordered.into_iter().enumerate() {
        let employee_tax = gross * rate;
        let employer_tax =
            employee.employer_taxes_excl_futa * (gross / employee.gross_pay);

        let share = remaining / Decimal::from((bucket_count - index) as u64);
        let net_before_deductions = gross - employee_tax;

        let (net, consumed) = if share <= net_before_deductions {
            (net_before_deductions - share, share)
        } else {
            // The bucket cannot cover its share; drain it and push the
            // rest onto the remaining buckets.
            (Decimal::ZERO, net_before_deductions)
        };
        remaining -= consumed;
        applied += consumed;

        lines.push(ProgramLine {
            program,
            gross,
            employee_tax,
            employer_tax,
            net,
            deduction_applied: consumed,
        });
    }

    if applied < employee.deductions {
        diagnostics.push(Diagnostic::DeductionResidue {
            employee: employee.name.clone(),
            unapplied: employee.deductions - applied,
        });
    }

    EmployeeAllocation { lines, diagnostics }
}
