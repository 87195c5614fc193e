//! Custom error types for finplan
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// Reasons the food budget breakdown cannot be produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// The budget to spread is zero or negative
    #[error(
        "No budget to allocate: the monthly budget is the sum of all expenses in the \
         budget category, add expenses to see the breakdown"
    )]
    InvalidBudget,

    /// The reference month name does not describe a calendar month
    #[error("Cannot read a calendar month from '{0}'")]
    UnparseableDate(String),

    /// Today lies outside the cycle
    #[error("Today is outside the budget cycle")]
    NoCurrentBlock,
}

/// The main error type for finplan operations
#[derive(Error, Debug)]
pub enum FinplanError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and user input
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

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// The data provider rejected or failed a request
    #[error("Provider error: {0}")]
    Provider(String),

    /// Session token errors
    #[error("Session error: {0}")]
    Session(String),

    /// Food budget breakdown errors
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

impl FinplanError {
    /// Create a "not found" error for months
    pub fn month_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Month",
            identifier: identifier.into(),
        }
    }

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

    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
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
}

impl From<std::io::Error> for FinplanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinplanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for finplan operations
pub type FinplanResult<T> = Result<T, FinplanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinplanError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FinplanError::month_not_found("December 2025");
        assert_eq!(err.to_string(), "Month not found: December 2025");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_allocation_error_is_transparent() {
        let err: FinplanError = AllocationError::UnparseableDate("Smarch 2025".into()).into();
        assert_eq!(err.to_string(), "Cannot read a calendar month from 'Smarch 2025'");
        assert!(matches!(
            err,
            FinplanError::Allocation(AllocationError::UnparseableDate(_))
        ));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FinplanError = io_err.into();
        assert!(matches!(err, FinplanError::Io(_)));
    }
}
