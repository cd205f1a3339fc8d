use chrono::{DateTime, Utc};
use tokio_postgres::Row;

/// Represents a user session.
///
/// The token is an opaque unguessable string; expiry is evaluated lazily at
/// read time, so expired rows may linger until the owning user logs in again.
#[derive(Debug, Clone)]
pub struct Session {
    /// The unique identifier for the session.
    pub id: i64,
    /// The ID of the user this session belongs to.
    pub user_id: i64,
    /// The opaque bearer token identifying this session.
    pub session_token: String,
    /// The timestamp when the session was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the session expires.
    pub expires_at: DateTime<Utc>,
}

impl From<&Row> for Session {
    fn from(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            user_id: row.get("user_id"),
            session_token: row.get("session_token"),
            created_at: row.get("created_at"),
            expires_at: row.get("expires_at"),
        }
    }
}
