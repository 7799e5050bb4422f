//! # JWT Token Management
//!
//! Bearer token generation and validation.
//!
//! ## Invariants
//! - Validation is stateless (no DB lookup)
//! - Tokens carry identity only: subject (username), user id, issue and expiry times
//! - Expiry is enforced with zero leeway

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::{AuthError, AuthResult};

/// JWT claims for access tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (username)
    pub sub: String,

    /// Numeric user id
    pub user_id: i64,

    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for HS256 signing
    pub secret: String,

    /// Access token lifetime
    pub access_token_ttl: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "CHANGE_THIS_SECRET_IN_PRODUCTION".to_string(),
            access_token_ttl: Duration::minutes(30),
        }
    }
}

/// JWT manager for token generation and validation
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    /// Create a new JWT manager with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generate an access token with the configured lifetime
    pub fn generate_access_token(&self, username: &str, user_id: i64) -> AuthResult<String> {
        self.issue_token(username, user_id, self.config.access_token_ttl)
    }

    /// Issue a token for `username` / `user_id` that expires `ttl` from now
    pub fn issue_token(&self, username: &str, user_id: i64, ttl: Duration) -> AuthResult<String> {
        let now = Utc::now();
        let exp = now.checked_add_signed(ttl).ok_or_else(|| {
            tracing::error!(ttl_seconds = ttl.num_seconds(), "token expiry out of range");
            AuthError::TokenGenerationFailed
        })?;

        let claims = JwtClaims {
            sub: username.to_string(),
            user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)
    }

    /// Validate an access token and extract its claims
    ///
    /// Every failure (bad signature, expiry, malformed payload, empty subject)
    /// collapses to [`AuthError::InvalidCredentials`].
    pub fn validate_token(&self, token: &str) -> AuthResult<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(reason = ?e.kind(), "rejected bearer token");
            AuthError::InvalidCredentials
        })?;

        if token_data.claims.sub.is_empty() {
            tracing::debug!("rejected bearer token with empty subject");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(token_data.claims)
    }
}

/// Token response returned to client on login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
