use deadpool_postgres::Pool;
use tokio_postgres::error::SqlState;

use crate::{
    error::{AppError, Result},
    models::user::{User, UserSummary},
};

/// Maps a unique-violation on username/email to `Conflict`; everything else
/// stays a storage error.
fn map_insert_error(e: tokio_postgres::Error) -> AppError {
    if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
        AppError::Conflict("Username or email already exists".to_string())
    } else {
        AppError::Database(e)
    }
}

/// Creates a new non-admin user.
pub async fn insert_user(
    pool: &Pool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
            &[&username, &email, &password_hash],
        )
        .await
        .map_err(map_insert_error)?;
    Ok(User::from(&row))
}

/// Finds a user by username, hash included, for credential verification.
pub async fn find_by_username(pool: &Pool, username: &str) -> Result<Option<User>> {
    let client = pool.get().await?;
    let row = client
        .query_opt("SELECT * FROM users WHERE username = $1", &[&username])
        .await?;
    Ok(row.as_ref().map(User::from))
}

/// All users, newest first, without password hashes.
pub async fn list_users(pool: &Pool) -> Result<Vec<UserSummary>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            "SELECT id, username, email, is_admin, created_at FROM users ORDER BY created_at DESC",
            &[],
        )
        .await?;
    Ok(rows.iter().map(UserSummary::from).collect())
}

/// Deletes a user together with their sessions. Returns `false` for an
/// unknown user.
pub async fn delete_user(pool: &Pool, user_id: i64) -> Result<bool> {
    let mut client = pool.get().await?;
    let tx = client.transaction().await?;
    tx.execute("DELETE FROM sessions WHERE user_id = $1", &[&user_id])
        .await?;
    let deleted = tx
        .execute("DELETE FROM users WHERE id = $1", &[&user_id])
        .await?;
    tx.commit().await?;
    Ok(deleted > 0)
}

/// Changes a user's username and email, refusing values already taken by
/// another account.
pub async fn update_profile(pool: &Pool, user_id: i64, username: &str, email: &str) -> Result<()> {
    let client = pool.get().await?;

    let taken = client
        .query_opt(
            "SELECT id FROM users WHERE (username = $1 OR email = $2) AND id <> $3",
            &[&username, &email, &user_id],
        )
        .await?;
    if taken.is_some() {
        return Err(AppError::Conflict(
            "Username or email already exists".to_string(),
        ));
    }

    client
        .execute(
            "UPDATE users SET username = $1, email = $2 WHERE id = $3",
            &[&username, &email, &user_id],
        )
        .await
        .map_err(map_insert_error)?;
    Ok(())
}
