//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition that can stop a payroll run.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Input-data errors ([`EngineError::InvalidPunch`], [`EngineError::MissingRate`])
/// and broken invariants ([`EngineError::AssertionViolation`]) are fatal for the
/// whole run: no partial payroll is ever produced.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::MissingRate {
///     employee: "JANE DOE".to_string(),
/// };
/// assert_eq!(error.to_string(), "No pay rate found for employee: JANE DOE");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A punch had a zero or negative duration.
    #[error("Invalid punch '{punch}': {message}")]
    InvalidPunch {
        /// A description of the punch (employee and times).
        punch: String,
        /// What made the punch invalid.
        message: String,
    },

    /// An employee has punches but no entry in the rate table.
    #[error("No pay rate found for employee: {employee}")]
    MissingRate {
        /// The normalized employee name.
        employee: String,
    },

    /// An internal invariant was broken. This indicates a logic bug, not bad data.
    #[error("Assertion violated: {message}")]
    AssertionViolation {
        /// A description of the broken invariant.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A timesheet or rate table could not be read.
    #[error("Failed to read table '{path}': {message}")]
    TableRead {
        /// The path of the table.
        path: String,
        /// A description of the read error.
        message: String,
    },

    /// An output table could not be written.
    #[error("Failed to write table '{path}': {message}")]
    TableWrite {
        /// The path of the table.
        path: String,
        /// A description of the write error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
