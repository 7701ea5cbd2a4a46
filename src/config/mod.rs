//! Override configuration for special-case employees.
//!
//! The category-to-program mapping for a handful of employees is overridden
//! by id. That table is the most change-prone business rule in the system,
//! so it is data (a versioned YAML file loaded at startup), not code.

mod loader;
mod types;

pub use loader::load_overrides;
pub use types::{CategorySplit, EmployeeOverride, Fraction, OverrideConfig};
