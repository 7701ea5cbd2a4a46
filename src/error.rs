//! Error types for the reconciliation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the fatal error tier. Conditions the engine can work around are not
//! errors; they are [`Diagnostic`](crate::models::Diagnostic) values
//! accumulated on the report.

use thiserror::Error;

/// The main error type for the reconciliation engine.
///
/// Every fatal condition aborts the run through this type; anything the run
/// can survive is surfaced as a diagnostic instead.
///
/// # Example
///
/// ```
/// use payroll_recon::error::EngineError;
///
/// let error = EngineError::InputNotFound {
///     path: "/missing/payroll.xlsx".to_string(),
/// };
/// assert_eq!(error.to_string(), "Input file not found: /missing/payroll.xlsx");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The input workbook was not found at the specified path.
    #[error("Input file not found: {path}")]
    InputNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The input workbook exists but could not be read or parsed.
    #[error("Failed to read workbook '{path}': {message}")]
    InputReadError {
        /// The path to the workbook that failed to read.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// The workbook contains no worksheets to process.
    #[error("Workbook '{path}' contains no worksheets")]
    EmptyWorkbook {
        /// The path to the offending workbook.
        path: String,
    },

    /// Override configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Override configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An employee override descriptor failed validation.
    #[error("Invalid override for employee {employee_id}: {message}")]
    InvalidOverride {
        /// The employee id the override applies to.
        employee_id: u64,
        /// A description of what made the override invalid.
        message: String,
    },

    /// The grand-total marker row was never found, so there are no
    /// authoritative totals to reconcile against.
    #[error("Grand total marker '{marker}' not found in the worksheet")]
    GrandTotalNotFound {
        /// The marker text that was searched for.
        marker: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
