//! Category-to-program mapping.
//!
//! Raw pay-category labels are consolidated onto canonical programs in
//! three steps: configured special-case splits consume their categories
//! first, then canonical names map to themselves, then the ordered general
//! rules run. Categories no rule can place are dropped with a diagnostic
//! instead of being silently misfiled.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::config::EmployeeOverride;
use crate::models::{Diagnostic, Employee, Program};

/// Pay categories that belong to whatever department the employee works in.
const MAP_TO_DEFAULT: [&str; 12] = [
    "Manage",
    "Mentor",
    "Full Class",
    "Training",
    "Overtime",
    "Private Lessons",
    "Senior Coach",
    "Sick",
    "Split Shift Premium",
    "Trainer",
    "Bonus",
    "Gift Cards or $$",
];

/// Resolves one category label to a program.
///
/// Rule order: a canonical program name maps to itself; the exact-name
/// table above maps to the employee's default department; then the
/// substring rules run ("Camps" / "Kids Night Out" belong to Events,
/// "Clean" to Maintenance, "Team Coach Fee" to Team). `None` means no rule
/// matched; the caller surfaces that as an unhandled category.
pub fn map_category(label: &str, default_department: Option<Program>) -> Option<Program> {
    if let Some(program) = Program::from_label(label) {
        return Some(program);
    }
    if MAP_TO_DEFAULT.contains(&label) {
        return default_department;
    }
    if label.contains("Camps") || label.contains("Kids Night Out") {
        return Some(Program::Events);
    }
    if label.contains("Clean") {
        return Some(Program::Maintenance);
    }
    if label.contains("Team Coach Fee") {
        return Some(Program::Team);
    }
    None
}

/// Consolidates an employee's raw categories into per-program gross
/// amounts.
///
/// Configured splits run first and consume their categories; every
/// remaining category goes through [`map_category`] with the (possibly
/// overridden) default department. Duplicate labels merge by addition, and
/// zero-amount buckets are never created.
pub fn build_program_buckets(
    employee: &Employee,
    employee_override: Option<&EmployeeOverride>,
) -> (BTreeMap<Program, Decimal>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    let default_department = employee_override
        .and_then(|o| o.department)
        .or_else(|| Program::from_label(&employee.default_department));

    let mut amounts: BTreeMap<String, Decimal> = BTreeMap::new();
    for category in &employee.categories {
        *amounts.entry(category.label.clone()).or_default() += category.amount;
    }

    let mut buckets: BTreeMap<Program, Decimal> = BTreeMap::new();

    if let Some(entry) = employee_override {
        for split in &entry.splits {
            let Some(amount) = amounts.remove(&split.category) else {
                diagnostics.push(Diagnostic::SplitCategoryMissing {
                    employee: employee.name.clone(),
                    category: split.category.clone(),
                });
                continue;
            };
            let share_total = amount * split.fraction.value();
            let per_target = share_total / Decimal::from(split.targets.len() as u64);
            for target in &split.targets {
                *buckets.entry(*target).or_default() += per_target;
            }
            if let Some(remainder_target) = split.remainder_to {
                *buckets.entry(remainder_target).or_default() += amount - share_total;
            }
        }
    }

    for (label, amount) in amounts {
        match map_category(&label, default_department) {
            Some(program) => *buckets.entry(program).or_default() += amount,
            None => diagnostics.push(Diagnostic::UnhandledCategory {
                employee: employee.name.clone(),
                category: label,
            }),
        }
    }

    buckets.retain(|_, amount| !amount.is_zero());

    (buckets, diagnostics)
}
