//! Override configuration types.
//!
//! This module contains the strongly-typed override structures that are
//! deserialized from the YAML override file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Program;

/// An exact fraction expressed as numerator over denominator.
///
/// Fractions like 2/3 do not terminate in decimal, so the split share is
/// configured as integers and divided with `Decimal` precision at
/// application time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    /// The numerator.
    pub numerator: u32,
    /// The denominator. Must be nonzero.
    pub denominator: u32,
}

impl Fraction {
    /// The fraction as a `Decimal`.
    pub fn value(&self) -> Decimal {
        Decimal::from(self.numerator) / Decimal::from(self.denominator)
    }

    /// True when the fraction equals one.
    pub fn is_whole(&self) -> bool {
        self.numerator == self.denominator
    }
}

/// A configured split of one named pay category.
///
/// `fraction` of the category's amount is distributed evenly across
/// `targets`; the remainder (if any) goes to `remainder_to`. The split
/// consumes the category, so it never also flows through the general
/// mapping rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySplit {
    /// The category label the split consumes (e.g. "Manage").
    pub category: String,
    /// The share of the category amount distributed evenly across targets.
    pub fraction: Fraction,
    /// The programs receiving the even split.
    pub targets: Vec<Program>,
    /// The program receiving the remainder when `fraction` < 1.
    #[serde(default)]
    pub remainder_to: Option<Program>,
}

/// The override descriptor for one special-case employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeOverride {
    /// The employee id the override applies to.
    pub employee_id: u64,
    /// Free-form annotation for the humans maintaining this file.
    #[serde(default)]
    pub note: Option<String>,
    /// Replaces the employee's default department before mapping.
    #[serde(default)]
    pub department: Option<Program>,
    /// Category splits applied before the general mapping rules.
    #[serde(default)]
    pub splits: Vec<CategorySplit>,
}

/// The full override table, keyed by employee id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverrideConfig {
    /// All configured employee overrides.
    #[serde(default)]
    pub overrides: Vec<EmployeeOverride>,
}

impl OverrideConfig {
    /// Returns the override for an employee id, if one is configured.
    pub fn for_employee(&self, id: u64) -> Option<&EmployeeOverride> {
        self.overrides.iter().find(|o| o.employee_id == id)
    }

    /// Validates every override descriptor.
    ///
    /// A split must have a nonzero denominator, a fraction no greater than
    /// one, at least one target, and a remainder target whenever the
    /// fraction is below one, otherwise part of the category amount would
    /// silently vanish from the totals.
    pub fn validate(&self) -> EngineResult<()> {
        for entry in &self.overrides {
            for split in &entry.splits {
                if split.fraction.denominator == 0 {
                    return Err(EngineError::InvalidOverride {
                        employee_id: entry.employee_id,
                        message: format!(
                            "split '{}' has a zero denominator",
                            split.category
                        ),
                    });
                }
                if split.fraction.numerator > split.fraction.denominator {
                    return Err(EngineError::InvalidOverride {
                        employee_id: entry.employee_id,
                        message: format!(
                            "split '{}' fraction exceeds one",
                            split.category
                        ),
                    });
                }
                if split.targets.is_empty() {
                    return Err(EngineError::InvalidOverride {
                        employee_id: entry.employee_id,
                        message: format!("split '{}' has no target programs", split.category),
                    });
                }
                if !split.fraction.is_whole() && split.remainder_to.is_none() {
                    return Err(EngineError::InvalidOverride {
                        employee_id: entry.employee_id,
                        message: format!(
                            "split '{}' needs a remainder target for a partial fraction",
                            split.category
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}
