//! Table definitions

use sqlx::SqliteConnection;

use super::errors::StoreResult;

/// DDL statements, applied in order. Each one is idempotent.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        content TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_posts_user_id ON posts(user_id)",
    "CREATE TABLE IF NOT EXISTS likes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        CONSTRAINT unique_like UNIQUE (post_id, user_id)
    )",
    "CREATE INDEX IF NOT EXISTS idx_likes_user_id ON likes(user_id)",
    "CREATE TABLE IF NOT EXISTS comments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        content TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments(post_id)",
    "CREATE INDEX IF NOT EXISTS idx_comments_user_id ON comments(user_id)",
];

/// Create every table and index that is missing
pub async fn create_all(conn: &mut SqliteConnection) -> StoreResult<()> {
    for statement in SCHEMA {
        sqlx::query(*statement).execute(&mut *conn).await?;
    }
    tracing::debug!(statements = SCHEMA.len(), "schema ensured");
    Ok(())
}
