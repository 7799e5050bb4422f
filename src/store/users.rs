//! Credential store: the `users` table

use sqlx::SqliteConnection;

use super::errors::StoreResult;
use crate::auth::User;

/// Insert a user. A taken username surfaces as [`super::StoreError::Conflict`].
pub async fn insert(
    conn: &mut SqliteConnection,
    username: &str,
    password_hash: &str,
) -> StoreResult<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password_hash) VALUES (?, ?)
         RETURNING id, username, password_hash",
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(&mut *conn)
    .await?;

    Ok(user)
}

pub async fn find_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> StoreResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(user)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> StoreResult<Option<User>> {
    let user =
        sqlx::query_as::<_, User>("SELECT id, username, password_hash FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(user)
}

pub async fn username_exists(conn: &mut SqliteConnection, username: &str) -> StoreResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(&mut *conn)
        .await?;

    Ok(count > 0)
}

/// Delete a user together with their posts, likes and comments.
///
/// Returns `false` when no such user exists.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Database, StoreError};

    async fn setup() -> Database {
        let db = Database::in_memory().await.unwrap();
        db.create_schema().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = setup().await;
        let mut conn = db.acquire().await.unwrap();

        let user = insert(&mut conn, "alice", "hash").await.unwrap();

        let by_name = find_by_username(&mut conn, "alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);
        assert_eq!(by_name.password_hash, "hash");

        let by_id = find_by_id(&mut conn, user.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");

        assert!(find_by_username(&mut conn, "bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_unique() {
        let db = setup().await;
        let mut conn = db.acquire().await.unwrap();

        insert(&mut conn, "alice", "hash").await.unwrap();
        assert!(username_exists(&mut conn, "alice").await.unwrap());
        assert!(!username_exists(&mut conn, "bob").await.unwrap());

        let result = insert(&mut conn, "alice", "other").await;
        assert!(matches!(result, Err(StoreError::Conflict)));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = setup().await;
        let mut conn = db.acquire().await.unwrap();

        let user = insert(&mut conn, "alice", "hash").await.unwrap();

        assert!(delete(&mut conn, user.id).await.unwrap());
        assert!(!delete(&mut conn, user.id).await.unwrap());
        assert!(find_by_id(&mut conn, user.id).await.unwrap().is_none());
    }
}
