//! Positional extraction from the worksheet grid.
//!
//! This module contains everything that turns the schemaless cell grid into
//! typed records: the fixed column layout and marker table, the department
//! index, the employee extractor, and the grand-total extractor.

mod departments;
mod employees;
mod grand_total;
pub mod layout;

pub use departments::DepartmentIndex;
pub use employees::{Extraction, extract_employees};
pub use grand_total::extract_grand_totals;
