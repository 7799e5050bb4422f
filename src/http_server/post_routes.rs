//! Post HTTP Routes
//!
//! CRUD over `/api/posts` plus the like and comment sub-resources.
//!
//! Reads are public. Writes need a bearer token; any authenticated user may
//! edit or delete any post (no ownership check).

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;

use super::errors::ApiError;
use super::extract::{ApiJson, ApiPath, BearerToken, DbConn};
use super::state::AppState;
use crate::store::{comments, likes, posts, StoreError};

/// Post routes with shared state
pub fn post_routes(state: AppState) -> Router {
    Router::new()
        .route("/posts", post(create_post_handler).get(list_posts_handler))
        .route(
            "/posts/:id",
            get(get_post_handler)
                .put(update_post_handler)
                .delete(delete_post_handler),
        )
        .route("/posts/:id/like", post(like_post_handler))
        .route("/posts/:id/comment", post(add_comment_handler))
        .route("/posts/:id/comments", get(list_comments_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub content: String,
}

impl From<comments::Comment> for CommentResponse {
    fn from(comment: comments::Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub likes_count: i64,
    pub comments: Vec<CommentResponse>,
}

impl PostResponse {
    fn new(post: posts::Post, comments: Vec<comments::Comment>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            likes_count: post.likes_count,
            comments: comments.into_iter().map(CommentResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Attach comments to a post row
async fn post_response(
    conn: &mut SqliteConnection,
    post: posts::Post,
) -> Result<PostResponse, ApiError> {
    let comments = comments::list_for_post(conn, post.id).await?;
    Ok(PostResponse::new(post, comments))
}

// ==================
// Handlers
// ==================

/// Create a post owned by the current user
async fn create_post_handler(
    State(state): State<AppState>,
    token: BearerToken,
    mut conn: DbConn,
    ApiJson(request): ApiJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let user = state.auth.authenticate(&mut conn, token.as_str()).await?;

    let post = posts::insert(&mut conn, user.id, &request.title, &request.content).await?;

    tracing::info!(post_id = post.id, user_id = user.id, "post created");
    Ok((StatusCode::CREATED, Json(PostResponse::new(post, Vec::new()))))
}

/// List every post; 404 when there are none
async fn list_posts_handler(mut conn: DbConn) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let rows = posts::list(&mut conn).await?;
    if rows.is_empty() {
        return Err(ApiError::NoPosts);
    }

    let mut response = Vec::with_capacity(rows.len());
    for post in rows {
        response.push(post_response(&mut conn, post).await?);
    }

    Ok(Json(response))
}

async fn get_post_handler(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = posts::find(&mut conn, id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;

    Ok(Json(post_response(&mut conn, post).await?))
}

/// Change the title and/or content of a post
async fn update_post_handler(
    State(state): State<AppState>,
    token: BearerToken,
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let user = state.auth.authenticate(&mut conn, token.as_str()).await?;

    let changes = posts::PostChanges {
        title: request.title.as_deref(),
        content: request.content.as_deref(),
    };
    let post = posts::update(&mut conn, id, changes)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;

    tracing::info!(post_id = post.id, user_id = user.id, "post updated");
    Ok(Json(post_response(&mut conn, post).await?))
}

async fn delete_post_handler(
    State(state): State<AppState>,
    token: BearerToken,
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    let user = state.auth.authenticate(&mut conn, token.as_str()).await?;

    if !posts::delete(&mut conn, id).await? {
        return Err(ApiError::NotFound("Post"));
    }

    tracing::info!(post_id = id, user_id = user.id, "post deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Like a post; a user can like a given post only once
async fn like_post_handler(
    State(state): State<AppState>,
    token: BearerToken,
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let user = state.auth.authenticate(&mut conn, token.as_str()).await?;

    if !posts::exists(&mut conn, id).await? {
        return Err(ApiError::NotFound("Post"));
    }

    match likes::insert(&mut conn, id, user.id).await {
        Ok(_) => {}
        Err(StoreError::Conflict) => return Err(ApiError::AlreadyLiked),
        // Post deleted between the existence check and the insert
        Err(StoreError::MissingReference) => return Err(ApiError::NotFound("Post")),
        Err(e) => return Err(e.into()),
    }

    tracing::info!(post_id = id, user_id = user.id, "post liked");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Post liked successfully".to_string(),
        }),
    ))
}

async fn add_comment_handler(
    State(state): State<AppState>,
    token: BearerToken,
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let user = state.auth.authenticate(&mut conn, token.as_str()).await?;

    if !posts::exists(&mut conn, id).await? {
        return Err(ApiError::NotFound("Post"));
    }

    let comment = match comments::insert(&mut conn, id, user.id, &request.content).await {
        Ok(comment) => comment,
        Err(StoreError::MissingReference) => return Err(ApiError::NotFound("Post")),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(post_id = id, comment_id = comment.id, user_id = user.id, "comment added");
    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

async fn list_comments_handler(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    if !posts::exists(&mut conn, id).await? {
        return Err(ApiError::NotFound("Post"));
    }

    let comments = comments::list_for_post(&mut conn, id).await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}
