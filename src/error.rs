//! Error types for the Compensation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur around compensation calculation.
//! The calculator itself never fails; errors come from validation,
//! configuration loading and the record store.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Compensation Engine.
///
/// # Example
///
/// ```
/// use compensation_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/calculator.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/calculator.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A compensation input failed pre-save validation.
    #[error("Invalid compensation field '{field}': {message}")]
    InvalidCompensation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An amount or percentage lies outside the range the calculator supports.
    #[error("Field '{field}' is outside the supported range of +/-{limit}: {value}")]
    AmountOutOfRange {
        /// The field that was out of range.
        field: String,
        /// The largest supported magnitude for the field.
        limit: Decimal,
        /// The value that was supplied.
        value: Decimal,
    },

    /// A salary revision request was incomplete or invalid.
    #[error("Invalid revision field '{field}': {message}")]
    InvalidRevision {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The derived fixed allowance of a revision came out negative and the
    /// configured policy rejects it.
    #[error("Derived fixed allowance is negative: {amount}")]
    NegativeFixedAllowance {
        /// The negative monthly remainder.
        amount: Decimal,
    },

    /// No employee record exists for the identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: String,
    },

    /// The record store failed to read or write.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
