//! # Cryptographic Utilities
//!
//! Password hashing and credential input rules.
//!
//! Passwords are only ever stored as salted Argon2id hashes. Verification goes
//! through the argon2 verifier, which compares digests in constant time.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::errors::{AuthError, AuthResult};

/// Longest accepted username, in characters
pub const MAX_USERNAME_LEN: usize = 64;

/// Password requirements configuration
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    /// Validate a password against this policy
    pub fn validate(&self, password: &str) -> AuthResult<()> {
        validate_password(password, self)
    }
}

/// Validate password against policy
pub fn validate_password(password: &str, policy: &PasswordPolicy) -> AuthResult<()> {
    if password.chars().count() < policy.min_length {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {} characters",
            policy.min_length
        )));
    }

    Ok(())
}

/// Validate a username: non-blank and at most [`MAX_USERNAME_LEN`] characters
pub fn validate_username(username: &str) -> AuthResult<()> {
    if username.trim().is_empty() {
        return Err(AuthError::InvalidUsername(
            "Username must not be empty".to_string(),
        ));
    }

    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AuthError::InvalidUsername(format!(
            "Username must be at most {} characters",
            MAX_USERNAME_LEN
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id with a fresh random salt
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::HashingFailed)
}

/// Verify a password against its stored hash
///
/// A stored hash that fails to parse is a server-side fault, not a bad login.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::HashingFailed)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Run a full verification against a throwaway hash and discard the result.
///
/// Used when the username is unknown so that the failed-login path costs the
/// same as a wrong password.
pub fn verify_against_dummy(password: &str) {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    let dummy = DUMMY_HASH.get_or_init(|| hash_password("quill-dummy-password").ok());
    if let Some(hash) = dummy {
        let _ = verify_password(password, hash);
    }
}
