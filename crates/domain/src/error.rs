//! Unified error types for the domain layer
//!
//! Provides a common error type for record validation and lookups, so the
//! client can report failures without falling back to String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., a required field is blank)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// An equivalent record already exists
    #[error("Duplicate {entity_type}: {key}")]
    Duplicate {
        entity_type: &'static str,
        key: String,
    },

    /// Parse error (for ids and payloads)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for violated record invariants.
    ///
    /// Use this when a required field is empty or a value is outside the
    /// allowed shape:
    ///
    /// ```
    /// use issuedraft_domain::DomainError;
    ///
    /// let err = DomainError::validation("title cannot be empty");
    /// assert_eq!(err.to_string(), "Validation failed: title cannot be empty");
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create a duplicate record error
    pub fn duplicate(entity_type: &'static str, key: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            key: key.into(),
        }
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Whether this error came from user-correctable input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Parse(_))
    }
}
