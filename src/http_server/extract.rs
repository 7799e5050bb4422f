//! Request extractors
//!
//! Handlers declare what they need as explicit parameters:
//! - [`DbConn`]: one pooled connection, released when the handler returns
//! - [`BearerToken`]: the raw token from `Authorization: Bearer ...`
//! - [`ApiJson`]: JSON body whose rejections map to 400
//! - [`ApiPath`]: path parameters whose rejections map to 400
//! - [`LoginForm`]: login credentials as JSON or urlencoded form

use std::ops::{Deref, DerefMut};

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts, HeaderMap},
    Form, Json,
};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection};

use super::errors::ApiError;
use super::state::AppState;
use crate::auth::{AuthError, LoginRequest};

/// A database connection scoped to one request
pub struct DbConn(pub PoolConnection<Sqlite>);

#[async_trait]
impl FromRequestParts<AppState> for DbConn {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.db.acquire().await?))
    }
}

impl Deref for DbConn {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Bearer token taken from the `Authorization` header
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_bearer(&parts.headers)
            .map(|token| Self(token.to_string()))
            .ok_or_else(|| {
                tracing::debug!("missing or malformed authorization header");
                ApiError::Auth(AuthError::InvalidCredentials)
            })
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    Some(token)
}

/// JSON body extractor that reports bad bodies as 400
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters; an unparsable id is a 400 with the usual error body
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Login credentials from either a JSON body or an
/// `application/x-www-form-urlencoded` body
pub struct LoginForm(pub LoginRequest);

#[async_trait]
impl<S> FromRequest<S> for LoginForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        if is_form {
            let Form(request) = Form::<LoginRequest>::from_request(req, state).await?;
            Ok(Self(request))
        } else {
            let Json(request) = Json::<LoginRequest>::from_request(req, state).await?;
            Ok(Self(request))
        }
    }
}
