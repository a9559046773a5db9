//! Domain-level error types.

use thiserror::Error;

/// Repository-level errors.
///
/// `NotFound` covers commands aimed at a missing row; queries express
/// absence as `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
