//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ==================
    // Authentication Errors
    // ==================

    /// Bearer token missing, malformed, expired, badly signed, or naming a
    /// user that no longer exists
    #[error("Could not validate credentials")]
    InvalidCredentials,

    /// Login failed (generic - don't leak whether the username exists)
    #[error("Incorrect username or password")]
    IncorrectLogin,

    /// Username already registered
    #[error("Username already taken")]
    UsernameTaken,

    // ==================
    // Input Errors
    // ==================

    /// Username is blank or too long
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    // ==================
    // Internal Errors
    // ==================

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request (conflicts are reported as 400 too)
            AuthError::IncorrectLogin => 400,
            AuthError::UsernameTaken => 400,
            AuthError::InvalidUsername(_) => 400,
            AuthError::WeakPassword(_) => 400,

            // 401 Unauthorized
            AuthError::InvalidCredentials => 401,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::TokenGenerationFailed => 500,
            AuthError::StorageError(_) => 500,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::StorageError(err.to_string())
    }
}
