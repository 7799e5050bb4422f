//! The `likes` table

use serde::Serialize;
use sqlx::{FromRow, SqliteConnection};

use super::errors::StoreResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Like {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
}

/// Record that `user_id` likes `post_id`.
///
/// A second like by the same user is rejected by the `unique_like` constraint
/// and surfaces as [`super::StoreError::Conflict`], so concurrent duplicate
/// requests resolve in the database.
pub async fn insert(conn: &mut SqliteConnection, post_id: i64, user_id: i64) -> StoreResult<Like> {
    let like = sqlx::query_as::<_, Like>(
        "INSERT INTO likes (post_id, user_id) VALUES (?, ?) RETURNING id, post_id, user_id",
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(like)
}

pub async fn count_for_post(conn: &mut SqliteConnection, post_id: i64) -> StoreResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}

pub async fn count_for_user(conn: &mut SqliteConnection, user_id: i64) -> StoreResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}
