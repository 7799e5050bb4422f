//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert or update hit a UNIQUE constraint
    #[error("duplicate value violates a unique constraint")]
    Conflict,

    /// Referenced row does not exist (foreign key violation)
    #[error("referenced row does not exist")]
    MissingReference,

    /// Any other database failure
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::Conflict;
            }
            if db_err.is_foreign_key_violation() {
                return StoreError::MissingReference;
            }
        }
        StoreError::Database(err)
    }
}
