//! The `posts` table

use serde::Serialize;
use sqlx::{FromRow, SqliteConnection};

use super::errors::StoreResult;

/// A post row together with its like count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub likes_count: i64,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct PostChanges<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
}

const SELECT_POST: &str = "SELECT p.id, p.user_id, p.title, p.content,
        (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS likes_count
     FROM posts p";

pub async fn insert(
    conn: &mut SqliteConnection,
    user_id: i64,
    title: &str,
    content: &str,
) -> StoreResult<Post> {
    let post = sqlx::query_as::<_, Post>(
        "INSERT INTO posts (user_id, title, content) VALUES (?, ?, ?)
         RETURNING id, user_id, title, content, 0 AS likes_count",
    )
    .bind(user_id)
    .bind(title)
    .bind(content)
    .fetch_one(&mut *conn)
    .await?;

    Ok(post)
}

pub async fn find(conn: &mut SqliteConnection, id: i64) -> StoreResult<Option<Post>> {
    let post = sqlx::query_as::<_, Post>(&format!("{SELECT_POST} WHERE p.id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(post)
}

/// All posts, oldest first
pub async fn list(conn: &mut SqliteConnection) -> StoreResult<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(&format!("{SELECT_POST} ORDER BY p.id"))
        .fetch_all(&mut *conn)
        .await?;

    Ok(posts)
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> StoreResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE id = ?")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(count > 0)
}

/// Apply `changes` and return the updated post, or `None` if it does not exist
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    changes: PostChanges<'_>,
) -> StoreResult<Option<Post>> {
    let result = sqlx::query(
        "UPDATE posts SET title = COALESCE(?, title), content = COALESCE(?, content)
         WHERE id = ?",
    )
    .bind(changes.title)
    .bind(changes.content)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    find(conn, id).await
}

/// Delete a post with its likes and comments. Returns `false` if it did not exist.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
