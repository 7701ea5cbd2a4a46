//! Canonical program (cost center) enumeration.
//!
//! Gross pay, taxes, and deductions are allocated into this fixed set of
//! programs. Raw pay-category labels from the worksheet may or may not match
//! a program name; the mapping rules live in
//! [`allocation::mapping`](crate::allocation).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cost-center bucket that pay amounts are allocated into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Program {
    /// Administrative staff.
    Admin,
    /// Dance program.
    Dance,
    /// Events, camps, and kids-night-out programming.
    Events,
    /// Gymnastics program.
    Gymnastics,
    /// Front-desk and hospitality staff.
    Hospitality,
    /// Polkadots preschool program.
    Polkadots,
    /// Swim program.
    Swim,
    /// TAG (tumbling and gymnastics) program.
    Tag,
    /// Competitive team.
    Team,
    /// Tumblebunny toddler program.
    Tumblebunny,
    /// Facility maintenance.
    Maintenance,
}

impl Program {
    /// Every canonical program, in accumulator order.
    pub const ALL: [Program; 11] = [
        Program::Admin,
        Program::Dance,
        Program::Events,
        Program::Gymnastics,
        Program::Hospitality,
        Program::Polkadots,
        Program::Swim,
        Program::Tag,
        Program::Team,
        Program::Tumblebunny,
        Program::Maintenance,
    ];

    /// Parses a worksheet label that is already a canonical program name.
    ///
    /// Returns `None` for any label that is not an exact program name;
    /// labels like "Mentor" or "Summer Camps" are resolved by the mapping
    /// rules instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_recon::models::Program;
    ///
    /// assert_eq!(Program::from_label("Swim"), Some(Program::Swim));
    /// assert_eq!(Program::from_label("TAG"), Some(Program::Tag));
    /// assert_eq!(Program::from_label("Mentor"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Program> {
        match label {
            "Admin" => Some(Program::Admin),
            "Dance" => Some(Program::Dance),
            "Events" => Some(Program::Events),
            "Gymnastics" => Some(Program::Gymnastics),
            "Hospitality" => Some(Program::Hospitality),
            "Polkadots" => Some(Program::Polkadots),
            "Swim" => Some(Program::Swim),
            "TAG" => Some(Program::Tag),
            "Team" => Some(Program::Team),
            "Tumblebunny" => Some(Program::Tumblebunny),
            "Maintenance" => Some(Program::Maintenance),
            _ => None,
        }
    }

    /// The canonical display name, matching the worksheet spelling.
    pub fn name(&self) -> &'static str {
        match self {
            Program::Admin => "Admin",
            Program::Dance => "Dance",
            Program::Events => "Events",
            Program::Gymnastics => "Gymnastics",
            Program::Hospitality => "Hospitality",
            Program::Polkadots => "Polkadots",
            Program::Swim => "Swim",
            Program::Tag => "TAG",
            Program::Team => "Team",
            Program::Tumblebunny => "Tumblebunny",
            Program::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
