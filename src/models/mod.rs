//! Core data models for the reconciliation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod grid;
mod program;
mod report;

pub use employee::{CategoryPay, Employee};
pub use grid::{CellValue, SheetGrid};
pub use program::Program;
pub use report::{
    ComparisonLine, Diagnostic, GrandTotals, ProgramAccumulators, ProgramNetLine, ProgramTaxLine,
    ProgramTotals, ReconciliationReport,
};
