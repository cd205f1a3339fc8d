use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_postgres::Row;

/// Represents a user row, including the password hash. Never serialized.
#[derive(Debug, Clone)]
pub struct User {
    /// The unique identifier for the user.
    pub id: i64,
    /// The user's unique username.
    pub username: String,
    /// The user's unique email address.
    pub email: String,
    /// Argon2id PHC-format password hash.
    pub password_hash: String,
    /// Whether the user holds the admin role. Immutable after creation.
    pub is_admin: bool,
    /// The timestamp when the user registered.
    pub created_at: DateTime<Utc>,
}

impl From<&Row> for User {
    fn from(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            is_admin: row.get("is_admin"),
            created_at: row.get("created_at"),
        }
    }
}

/// The identity a resolved session yields: what handlers are allowed to see
/// of the calling user.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// A user as shown in the admin user listing.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Row> for UserSummary {
    fn from(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            is_admin: row.get("is_admin"),
            created_at: row.get("created_at"),
        }
    }
}
