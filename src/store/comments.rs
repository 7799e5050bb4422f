//! The `comments` table

use serde::Serialize;
use sqlx::{FromRow, SqliteConnection};

use super::errors::StoreResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
}

pub async fn insert(
    conn: &mut SqliteConnection,
    post_id: i64,
    user_id: i64,
    content: &str,
) -> StoreResult<Comment> {
    let comment = sqlx::query_as::<_, Comment>(
        "INSERT INTO comments (post_id, user_id, content) VALUES (?, ?, ?)
         RETURNING id, post_id, user_id, content",
    )
    .bind(post_id)
    .bind(user_id)
    .bind(content)
    .fetch_one(&mut *conn)
    .await?;

    Ok(comment)
}

/// Comments on a post, oldest first
pub async fn list_for_post(conn: &mut SqliteConnection, post_id: i64) -> StoreResult<Vec<Comment>> {
    let comments = sqlx::query_as::<_, Comment>(
        "SELECT id, post_id, user_id, content FROM comments WHERE post_id = ? ORDER BY id",
    )
    .bind(post_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(comments)
}

pub async fn count_for_user(conn: &mut SqliteConnection, user_id: i64) -> StoreResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}
