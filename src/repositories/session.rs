use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;

use crate::{
    error::Result,
    models::{session::Session, user::AuthUser},
};

/// Persists a freshly minted session.
pub async fn insert_session(
    pool: &Pool,
    user_id: i64,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<Session> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO sessions (user_id, session_token, expires_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
            &[&user_id, &token, &expires_at],
        )
        .await?;
    Ok(Session::from(&row))
}

/// Deletes every session a user holds. Login calls this before minting a
/// new one, so a second login invalidates the first token.
pub async fn delete_for_user(pool: &Pool, user_id: i64) -> Result<u64> {
    let client = pool.get().await?;
    Ok(client
        .execute("DELETE FROM sessions WHERE user_id = $1", &[&user_id])
        .await?)
}

/// Deletes the session behind a token, if any. Logout is best-effort.
pub async fn delete_by_token(pool: &Pool, token: &str) -> Result<u64> {
    let client = pool.get().await?;
    Ok(client
        .execute("DELETE FROM sessions WHERE session_token = $1", &[&token])
        .await?)
}

/// Resolves a token to the owning user's identity.
///
/// Read-only probe: expiry is checked in the query itself (lazy expiry), an
/// expired or unknown token simply yields `None`, and nothing is refreshed.
pub async fn find_user_by_token(pool: &Pool, token: &str) -> Result<Option<AuthUser>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT u.id, u.username, u.email, u.is_admin
            FROM users u
            JOIN sessions s ON u.id = s.user_id
            WHERE s.session_token = $1 AND s.expires_at > NOW()
            "#,
            &[&token],
        )
        .await?;
    Ok(row.map(|r| AuthUser {
        id: r.get("id"),
        username: r.get("username"),
        email: r.get("email"),
        is_admin: r.get("is_admin"),
    }))
}
