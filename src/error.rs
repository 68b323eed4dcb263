//! Custom error types for gastos
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.
//!
//! Three kinds matter to callers: validation failures (bad user input),
//! I/O failures (the environment refused a read or write) and the rest.
//! Data-file corruption never shows up here; the store recovers from it.

use thiserror::Error;

use crate::models::ExpenseValidationError;

/// The main error type for gastos operations
#[derive(Error, Debug)]
pub enum GastosError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input and data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Report export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl GastosError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an I/O error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<std::io::Error> for GastosError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GastosError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<ExpenseValidationError> for GastosError {
    fn from(err: ExpenseValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for gastos operations
pub type GastosResult<T> = Result<T, GastosError>;
