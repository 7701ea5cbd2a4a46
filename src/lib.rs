//! Payroll program allocation and reconciliation engine.
//!
//! This crate ingests a fixed-layout payroll spreadsheet for a single pay
//! period, maps every employee's pay categories onto a canonical set of
//! programs (cost centers), prorates taxes and deductions across those
//! programs, and reconciles the aggregated totals against the grand totals
//! stated in the spreadsheet itself.

#![warn(missing_docs)]

pub mod allocation;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod reader;
