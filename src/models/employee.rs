//! Employee model.
//!
//! One [`Employee`] is produced per employee block found in the worksheet.
//! The record is immutable after extraction; transient allocation state
//! (deductions remaining) lives in the allocator, not here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One raw pay-category line for an employee, in worksheet order.
///
/// The label may or may not be a canonical program name; resolution happens
/// during allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPay {
    /// The normalized category label as read from the identifier column.
    pub label: String,
    /// Gross pay attributed to this category for the pay period.
    pub amount: Decimal,
}

/// An employee extracted from the worksheet, with stated period totals.
///
/// Invariant: `gross_pay > 0`. Blocks with zero or missing gross are skipped
/// by the extractor with a diagnostic and never become an `Employee`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Numeric employee id, when the identifier cell carried one.
    pub id: Option<u64>,
    /// Employee name as printed in the name column.
    pub name: String,
    /// Direct-deposit (net) amount stated below the employee header.
    pub net_pay: Decimal,
    /// Department in effect at the employee's header row.
    pub default_department: String,
    /// Raw pay categories in worksheet order.
    pub categories: Vec<CategoryPay>,
    /// Stated gross pay from the employee total row.
    pub gross_pay: Decimal,
    /// Stated employee-paid taxes from the employee total row.
    pub employee_taxes: Decimal,
    /// Stated deductions from the employee total row.
    pub deductions: Decimal,
    /// Stated employer taxes with FUTA already subtracted out.
    pub employer_taxes_excl_futa: Decimal,
    /// Employer FUTA read from the employee's FUTA marker row.
    pub employer_futa: Decimal,
}

impl Employee {
    /// The employee's effective tax rate: `(gross − net − deductions) / gross`.
    ///
    /// The rate is per employee, not per program; the allocator applies it
    /// uniformly across the employee's program buckets. Rates outside
    /// `[0, 1)` are possible on anomalous input and are flagged by the
    /// extractor rather than clamped here.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_recon::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: Some(12345),
    ///     name: "Jo Doe".to_string(),
    ///     net_pay: Decimal::new(48000, 2),
    ///     default_department: "Swim".to_string(),
    ///     categories: vec![],
    ///     gross_pay: Decimal::new(60000, 2),
    ///     employee_taxes: Decimal::new(10000, 2),
    ///     deductions: Decimal::new(2000, 2),
    ///     employer_taxes_excl_futa: Decimal::new(4000, 2),
    ///     employer_futa: Decimal::new(500, 2),
    /// };
    /// // (600 - 480 - 20) / 600
    /// assert_eq!(employee.effective_tax_rate().round_dp(4), Decimal::new(1667, 4));
    /// ```
    pub fn effective_tax_rate(&self) -> Decimal {
        (self.gross_pay - self.net_pay - self.deductions) / self.gross_pay
    }
}
