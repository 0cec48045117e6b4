//! Error types for Insura
//!
//! Provides a unified error type and the formula-domain error variants

use thiserror::Error;

/// Result type alias using InsuraError
pub type Result<T> = std::result::Result<T, InsuraError>;

/// Result type alias for pure formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Unified error type for Insura operations
#[derive(Debug, Error)]
pub enum InsuraError {
    // Formula errors
    #[error("Formula error: {0}")]
    Formula(#[from] FormulaError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Filesystem errors while loading configuration
    #[error("I/O error: {0}")]
    Io(String),
}

/// Formula calculation errors
///
/// Every formula operation either returns a value or one of these; there are
/// no partial results and no silent defaults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("Degenerate input in {operation}: {reason}")]
    DegenerateInput {
        operation: &'static str,
        reason: String,
    },

    #[error("Invalid period unit: {0} (expected DAY or HOUR)")]
    InvalidPeriodUnit(String),

    #[error("Value out of range for {field}: {value}")]
    InvalidRange { field: &'static str, value: String },

    #[error("Decimal overflow in {operation}")]
    Overflow { operation: &'static str },
}

impl FormulaError {
    pub fn degenerate(operation: &'static str, reason: impl Into<String>) -> Self {
        FormulaError::DegenerateInput {
            operation,
            reason: reason.into(),
        }
    }

    pub fn out_of_range(field: &'static str, value: impl ToString) -> Self {
        FormulaError::InvalidRange {
            field,
            value: value.to_string(),
        }
    }
}

impl From<serde_json::Error> for InsuraError {
    fn from(err: serde_json::Error) -> Self {
        InsuraError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for InsuraError {
    fn from(err: std::io::Error) -> Self {
        InsuraError::Io(err.to_string())
    }
}
