//! Reconciliation report models.
//!
//! This module contains the [`ReconciliationReport`] type and its associated
//! structures: per-program accumulators, the stated grand-total record, the
//! calculated-versus-stated comparison lines, and the typed diagnostics that
//! accumulate during a run.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

use super::Program;

/// A nonfatal condition surfaced during extraction or allocation.
///
/// Diagnostics never abort a run; they are collected on the report so a
/// human can triage them alongside the totals. Anything that must abort the
/// run is an [`EngineError`](crate::error::EngineError) instead.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A pay category matched no mapping rule; its amount was dropped from
    /// the program totals rather than silently misfiled.
    #[error("{employee}: unhandled category '{category}'")]
    UnhandledCategory {
        /// The employee the category belongs to.
        employee: String,
        /// The category label that failed to resolve.
        category: String,
    },

    /// Hours were reported for a category that carried no pay, meaning the
    /// employee did not get money they earned.
    #[error("{employee}: {hours} hours reported for '{category}' but earned $0")]
    HoursWithoutPay {
        /// The employee the row belongs to.
        employee: String,
        /// The category the hours were reported under.
        category: String,
        /// The hours that earned nothing.
        hours: Decimal,
    },

    /// The bounded forward probe for a category label ran out of rows; the
    /// pay row was skipped for categorization.
    #[error("{employee}: no category label found near row {row}")]
    LabelProbeExhausted {
        /// The employee being scanned.
        employee: String,
        /// The worksheet row of the orphaned pay amount.
        row: usize,
    },

    /// The employee total row stated zero or missing gross pay; the employee
    /// was excluded from allocation.
    #[error("{employee} had no earnings this pay period")]
    NoEarnings {
        /// The employee with no earnings.
        employee: String,
    },

    /// No employee total row was found below the employee's header.
    #[error("{employee}: employee total row not found")]
    TotalRowNotFound {
        /// The employee with no total row.
        employee: String,
    },

    /// The net-pay cell below the employee header was blank; net was read
    /// as zero.
    #[error("{employee}: net pay cell is blank, treated as zero")]
    MissingNetPay {
        /// The employee with no stated net pay.
        employee: String,
    },

    /// No FUTA marker row was found for the employee; FUTA was read as zero.
    #[error("{employee}: FUTA marker row not found, treated as zero")]
    MissingFutaMarker {
        /// The employee with no FUTA row.
        employee: String,
    },

    /// The effective tax rate fell outside `[0, 1)`. The rate is used as
    /// computed; this flags the anomaly for review.
    #[error("{employee}: effective tax rate {rate} is outside [0, 1)")]
    TaxRateAnomaly {
        /// The employee with the anomalous rate.
        employee: String,
        /// The computed rate.
        rate: Decimal,
    },

    /// Stated deductions exceed the employee's available net pay.
    #[error("{employee} has more deductions ({deductions}) than available net pay ({available})")]
    DeductionsExceedNet {
        /// The employee being allocated.
        employee: String,
        /// The stated deductions.
        deductions: Decimal,
        /// Gross pay minus employee taxes.
        available: Decimal,
    },

    /// The last program bucket could not absorb the remaining deductions.
    /// Expected only when deductions exceed total net earnings.
    #[error("{employee}: {unapplied} of deductions could not be applied to any program")]
    DeductionResidue {
        /// The employee being allocated.
        employee: String,
        /// The deduction amount left over after the last bucket.
        unapplied: Decimal,
    },

    /// A configured category split named a category the employee does not
    /// have this pay period; the split was skipped.
    #[error("{employee}: split category '{category}' not present this period")]
    SplitCategoryMissing {
        /// The employee the override applies to.
        employee: String,
        /// The category the split expected.
        category: String,
    },

    /// A stated grand-total value was missing from the worksheet and was
    /// read as zero for comparison purposes.
    #[error("stated value '{label}' missing from grand total block, treated as zero")]
    StatedValueMissing {
        /// Which stated value was missing.
        label: String,
    },
}

/// Accumulated totals for one program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramTotals {
    /// Gross pay allocated to the program.
    pub gross: Decimal,
    /// Employee-paid taxes prorated onto the program.
    pub employee_tax: Decimal,
    /// Employer taxes (excluding FUTA) prorated onto the program.
    pub employer_tax: Decimal,
    /// Net pay remaining after taxes and deduction consumption.
    pub net: Decimal,
}

/// Per-program accumulators, initialized to zero for every canonical
/// program before any employee is processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramAccumulators {
    totals: BTreeMap<Program, ProgramTotals>,
}

impl ProgramAccumulators {
    /// Creates accumulators with a zero entry for every canonical program.
    pub fn new() -> Self {
        let totals = Program::ALL
            .into_iter()
            .map(|p| (p, ProgramTotals::default()))
            .collect();
        Self { totals }
    }

    /// Adds one allocated bucket to the program's running totals.
    pub fn add(
        &mut self,
        program: Program,
        gross: Decimal,
        employee_tax: Decimal,
        employer_tax: Decimal,
        net: Decimal,
    ) {
        let entry = self.totals.entry(program).or_default();
        entry.gross += gross;
        entry.employee_tax += employee_tax;
        entry.employer_tax += employer_tax;
        entry.net += net;
    }

    /// Returns the totals for one program.
    pub fn get(&self, program: Program) -> &ProgramTotals {
        &self.totals[&program]
    }

    /// Iterates all programs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Program, &ProgramTotals)> {
        self.totals.iter().map(|(p, t)| (*p, t))
    }
}

impl Default for ProgramAccumulators {
    fn default() -> Self {
        Self::new()
    }
}

/// The spreadsheet-stated grand totals, extracted once per run and used only
/// for cross-validation. Never fed back into allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrandTotals {
    /// Stated gross pay for the period.
    pub gross: Decimal,
    /// Stated employee-paid taxes.
    pub employee_taxes: Decimal,
    /// Stated deductions.
    pub deductions: Decimal,
    /// Stated net (direct deposit) total.
    pub net: Decimal,
    /// Stated employer taxes with FUTA subtracted out.
    pub employer_taxes_excl_futa: Decimal,
    /// Stated employer FUTA.
    pub futa: Decimal,
    /// Stated CA ETT (tracked only at the grand-total level).
    pub ca_ett: Decimal,
}

/// One calculated-versus-stated comparison in the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonLine {
    /// The value the engine calculated from employee records.
    pub calculated: Decimal,
    /// The authoritative value stated in the worksheet.
    pub stated: Decimal,
}

impl ComparisonLine {
    /// Calculated minus stated.
    pub fn difference(&self) -> Decimal {
        self.calculated - self.stated
    }

    /// True when the two values agree within the tolerance.
    pub fn matches(&self, tolerance: Decimal) -> bool {
        self.difference().abs() <= tolerance
    }
}

/// Per-program tax line: employee tax, employer tax, and their sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramTaxLine {
    /// The program the taxes were allocated to.
    pub program: Program,
    /// Employee-paid taxes for the program.
    pub employee_tax: Decimal,
    /// Employer taxes (excluding FUTA) for the program.
    pub employer_tax: Decimal,
    /// Employee plus employer taxes.
    pub combined: Decimal,
}

/// Per-program net pay line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramNetLine {
    /// The program the net pay was allocated to.
    pub program: Program,
    /// Net pay for the program.
    pub net: Decimal,
}

/// The structured output of one reconciliation run.
///
/// The report is a read-only comparison: divergence between calculated and
/// stated values is surfaced for human review, never corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Tax lines for every program with nonzero combined tax.
    pub program_taxes: Vec<ProgramTaxLine>,
    /// Net lines for every program with positive net.
    pub program_net: Vec<ProgramNetLine>,
    /// Gross pay, calculated vs stated.
    pub gross: ComparisonLine,
    /// Employee taxes, calculated vs stated.
    pub employee_taxes: ComparisonLine,
    /// Employer taxes excluding FUTA, calculated vs stated.
    pub employer_taxes_excl_futa: ComparisonLine,
    /// Employer FUTA, calculated vs stated.
    pub futa: ComparisonLine,
    /// Net pay, calculated vs stated.
    pub net: ComparisonLine,
    /// Deductions, calculated vs stated.
    pub deductions: ComparisonLine,
    /// Stated CA ETT, carried through for the bank-debit total.
    pub stated_ca_ett: Decimal,
    /// Calculated employee taxes + employer taxes + CA ETT: the amount the
    /// tax withdrawal takes from the bank account.
    pub bank_debit_total: Decimal,
    /// Every nonfatal condition encountered during the run.
    pub diagnostics: Vec<Diagnostic>,
}

impl ReconciliationReport {
    /// True when every comparison line agrees within the tolerance.
    pub fn is_balanced(&self, tolerance: Decimal) -> bool {
        [
            &self.gross,
            &self.employee_taxes,
            &self.employer_taxes_excl_futa,
            &self.futa,
            &self.net,
            &self.deductions,
        ]
        .iter()
        .all(|line| line.matches(tolerance))
    }
}
