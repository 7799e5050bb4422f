//! Auth HTTP Routes
//!
//! `/auth/register`, `/auth/login` and the current-user endpoints.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};

use super::errors::ApiError;
use super::extract::{ApiJson, BearerToken, DbConn, LoginForm};
use super::state::AppState;
use crate::auth::{AuthError, RegisterRequest, TokenResponse, UserResponse};
use crate::store::users;

/// Auth routes with shared state
pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/me", get(me_handler).delete(delete_me_handler))
        .with_state(state)
}

/// Register a new account
async fn register_handler(
    State(state): State<AppState>,
    mut conn: DbConn,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.auth.register(&mut conn, request).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Exchange username and password for a bearer token
async fn login_handler(
    State(state): State<AppState>,
    mut conn: DbConn,
    LoginForm(request): LoginForm,
) -> Result<Json<TokenResponse>, ApiError> {
    let tokens = state.auth.login(&mut conn, request).await?;
    Ok(Json(tokens))
}

/// The user the bearer token belongs to
async fn me_handler(
    State(state): State<AppState>,
    token: BearerToken,
    mut conn: DbConn,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.auth.authenticate(&mut conn, token.as_str()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete the current account along with its posts, likes and comments
async fn delete_me_handler(
    State(state): State<AppState>,
    token: BearerToken,
    mut conn: DbConn,
) -> Result<StatusCode, ApiError> {
    let user = state.auth.authenticate(&mut conn, token.as_str()).await?;

    if !users::delete(&mut conn, user.id).await? {
        // Deleted by a concurrent request after authentication
        return Err(AuthError::InvalidCredentials.into());
    }

    tracing::info!(user_id = user.id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
