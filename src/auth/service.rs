//! # Auth Service
//!
//! Registration, login and bearer-token authentication on top of the
//! credential store.

use chrono::Duration;
use sqlx::SqliteConnection;

use super::crypto::{hash_password, validate_username, verify_against_dummy, PasswordPolicy};
use super::errors::{AuthError, AuthResult};
use super::jwt::{JwtClaims, JwtConfig, JwtManager, TokenResponse};
use super::user::{LoginRequest, RegisterRequest, User};
use crate::store::{users, StoreError};

/// Auth service combining password handling and token issuance
pub struct AuthService {
    jwt_manager: JwtManager,
    password_policy: PasswordPolicy,
}

impl AuthService {
    pub fn new(jwt_config: JwtConfig, password_policy: PasswordPolicy) -> Self {
        Self {
            jwt_manager: JwtManager::new(jwt_config),
            password_policy,
        }
    }

    /// Register a new user
    pub async fn register(
        &self,
        conn: &mut SqliteConnection,
        request: RegisterRequest,
    ) -> AuthResult<User> {
        validate_username(&request.username)?;
        self.password_policy.validate(&request.password)?;

        if users::username_exists(conn, &request.username).await? {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = hash_password(&request.password)?;

        // A concurrent registration can still win between the check and the
        // insert; the UNIQUE constraint settles it.
        let user = match users::insert(conn, &request.username, &password_hash).await {
            Ok(user) => user,
            Err(StoreError::Conflict) => return Err(AuthError::UsernameTaken),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Authenticate a user by password and issue an access token
    pub async fn login(
        &self,
        conn: &mut SqliteConnection,
        request: LoginRequest,
    ) -> AuthResult<TokenResponse> {
        let user = match users::find_by_username(conn, &request.username).await? {
            Some(user) => user,
            None => {
                verify_against_dummy(&request.password);
                tracing::debug!("login failed");
                return Err(AuthError::IncorrectLogin);
            }
        };

        if !user.verify_password(&request.password)? {
            tracing::debug!(user_id = user.id, "login failed");
            return Err(AuthError::IncorrectLogin);
        }

        let access_token = self
            .jwt_manager
            .generate_access_token(&user.username, user.id)?;

        tracing::info!(user_id = user.id, "user logged in");
        Ok(TokenResponse::bearer(access_token))
    }

    /// Issue a token with an explicit lifetime
    pub fn issue_token(&self, username: &str, user_id: i64, ttl: Duration) -> AuthResult<String> {
        self.jwt_manager.issue_token(username, user_id, ttl)
    }

    /// Verify a bearer token without touching storage
    pub fn verify_token(&self, token: &str) -> AuthResult<JwtClaims> {
        self.jwt_manager.validate_token(token)
    }

    /// Resolve a bearer token to the user it names
    ///
    /// The user is looked up by id and must still carry the token's subject.
    /// Ids are never reused, so a token for a deleted account stops working
    /// even if someone registers the same username again.
    pub async fn authenticate(&self, conn: &mut SqliteConnection, token: &str) -> AuthResult<User> {
        let claims = self.verify_token(token)?;

        match users::find_by_id(conn, claims.user_id).await? {
            Some(user) if user.username == claims.sub => Ok(user),
            Some(_) => {
                tracing::debug!(user_id = claims.user_id, "token subject does not match user");
                Err(AuthError::InvalidCredentials)
            }
            None => {
                tracing::debug!(user_id = claims.user_id, "token user no longer exists");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new(JwtConfig::default(), PasswordPolicy::default())
    }
}
