//! The fixed positional layout of the payroll worksheet.
//!
//! The worksheet has no schema and no header row: column meanings are fixed
//! by the payroll export, and structure is delimited by textual marker cells.
//! Every positional assumption the engine makes lives in this module so the
//! layout is auditable in one place. Rows move between pay periods; columns
//! are not expected to.

/// Column holding employee ids (on header rows) and pay-category labels
/// (on pay rows).
pub const IDENTIFIER_COL: usize = 1;

/// Column where the grand-total marker appears.
pub const GRAND_TOTAL_COL: usize = 2;

/// Column where the per-employee total marker appears.
pub const EMPLOYEE_TOTAL_COL: usize = 3;

/// Column holding department titles.
pub const DEPARTMENT_TITLE_COL: usize = 5;

/// Column holding employee names on header rows.
pub const EMPLOYEE_NAME_COL: usize = 6;

/// Column holding hours worked for a pay category.
pub const HOURS_COL: usize = 8;

/// Column holding the direct-deposit (net pay) amount, one row below the
/// employee header.
pub const NET_PAY_COL: usize = 10;

/// Column holding gross pay amounts (per category and on total rows).
pub const GROSS_PAY_COL: usize = 14;

/// Column holding employee tax totals.
pub const TAXES_COL: usize = 25;

/// Column holding deduction totals.
pub const DEDUCTIONS_COL: usize = 34;

/// Column where the FUTA and CA ETT marker texts appear.
pub const TAX_MARKER_COL: usize = 38;

/// Column holding employer tax amounts (including the FUTA and CA ETT rows).
pub const EMPLOYER_TAX_COL: usize = 43;

/// Marks the grand-total row in [`GRAND_TOTAL_COL`].
pub const GRAND_TOTAL_MARKER: &str = "Grand Tot:";

/// Marks an employee's total row in [`EMPLOYEE_TOTAL_COL`].
pub const EMPLOYEE_TOTAL_MARKER: &str = "Employee Tot:";

/// Marks a FUTA amount row in [`TAX_MARKER_COL`].
pub const FUTA_MARKER: &str = "FUTA";

/// Marks the CA ETT amount row in [`TAX_MARKER_COL`].
pub const CA_ETT_MARKER: &str = "CA ETT";

/// The stated net total sits this many rows below the grand-total row.
pub const STATED_NET_ROW_OFFSET: usize = 2;

/// The stated net total sits this many columns right of [`GROSS_PAY_COL`].
pub const STATED_NET_COL_OFFSET: usize = 3;

/// How many rows the category-label probe may walk forward before giving up.
/// Labels drift below their pay amounts when an employee has few categories.
pub const MAX_LABEL_LOOKAHEAD: usize = 100;

/// Known label aliases, collapsed to canonical spellings.
///
/// The export is inconsistent about a couple of program names; both the
/// department-title column and the category-label column are normalized
/// through this table.
const LABEL_ALIASES: [(&str, &str); 2] = [
    ("TumbleBunnies", "Tumblebunny"),
    ("Polka Dots", "Polkadots"),
];

/// Collapses known alias spellings to their canonical label.
///
/// Matching is substring-based, like all marker detection: the alias may be
/// embedded in longer cell text.
///
/// # Examples
///
/// ```
/// use payroll_recon::extract::layout::normalize_label;
///
/// assert_eq!(normalize_label("TumbleBunnies 3-4yr"), "Tumblebunny");
/// assert_eq!(normalize_label("Polka Dots AM"), "Polkadots");
/// assert_eq!(normalize_label("Swim"), "Swim");
/// ```
pub fn normalize_label(label: &str) -> String {
    for (alias, canonical) in LABEL_ALIASES {
        if label.contains(alias) {
            return canonical.to_string();
        }
    }
    label.to_string()
}
