//! Unified error type for the domain layer
//!
//! Sheet records validate themselves on construction; callers in the engine
//! wrap these errors in their own operation-level types.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., empty ability name)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A name that must be unique within a document is already taken
    #[error("Duplicate {entity_type}: {name}")]
    Duplicate {
        entity_type: &'static str,
        name: String,
    },

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Ability name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a duplicate-name error
    pub fn duplicate(entity_type: &'static str, name: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            name: name.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
