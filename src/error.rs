//! Custom error types for the household ledger
//!
//! Rejections of user input come in two flavours: structural
//! [`LedgerError::Validation`] failures that name the offending field, and
//! semantic [`LedgerError::BusinessRule`] failures carrying the reason produced
//! by the rule engine. The remaining variants cover infrastructure failures.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Structural validation failure on a single field
    #[error("Validation error: {field} {constraint}")]
    Validation {
        field: &'static str,
        constraint: String,
    },

    /// Semantic rejection (rule engine, unresolved references, restrict deletes)
    #[error("Business rule violated: {0}")]
    BusinessRule(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a validation error for a field
    pub fn validation(field: &'static str, constraint: impl Into<String>) -> Self {
        Self::Validation {
            field,
            constraint: constraint.into(),
        }
    }

    /// Create a "not found" error for people
    pub fn person_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Person",
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

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// A transaction referenced an entity that does not exist.
    ///
    /// Unlike a direct lookup miss this is a business rejection of the request.
    pub fn unresolved_reference(entity_type: &'static str, identifier: impl Into<String>) -> Self {
        Self::BusinessRule(format!("{} not found: {}", entity_type, identifier.into()))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a business rule rejection
    pub fn is_business_rule(&self) -> bool {
        matches!(self, Self::BusinessRule(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_validation_error_names_field() {
        let err = LedgerError::validation("amount", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Validation error: amount must be greater than zero"
        );
        assert!(err.is_validation());
        assert!(!err.is_business_rule());
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::person_not_found("Alice");
        assert_eq!(err.to_string(), "Person not found: Alice");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unresolved_reference_is_business_rule() {
        let err = LedgerError::unresolved_reference("Category", "cat-1234abcd");
        assert!(err.is_business_rule());
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Business rule violated: Category not found: cat-1234abcd"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
