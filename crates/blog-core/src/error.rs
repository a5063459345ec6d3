//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A required cross-field reference is missing (e.g. a comment without a post id).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    /// The operation is blocked by the current state of related rows.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity_type, id }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    /// Unique or foreign-key constraint violated.
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            RepoError::NotFound => DomainError::Internal("Row vanished during update".to_string()),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                DomainError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                DomainError::Internal("Database error".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_violation_becomes_duplicate() {
        let err: DomainError = RepoError::Constraint("users.email".to_string()).into();
        assert!(matches!(err, DomainError::Duplicate(msg) if msg == "users.email"));
    }

    #[test]
    fn test_query_error_is_hidden_behind_internal() {
        let err: DomainError = RepoError::Query("syntax error near SELECT".to_string()).into();
        assert!(matches!(err, DomainError::Internal(msg) if msg == "Database error"));
    }

    #[test]
    fn test_not_found_message() {
        let id = Uuid::nil();
        let err = DomainError::not_found("Post", id);
        assert_eq!(err.to_string(), format!("Post with id {} not found", id));
    }
}
