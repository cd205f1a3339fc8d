use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use chrono::Utc;
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

use crate::error::{AppError, Result};
use crate::models::{session::Session, user::AuthUser};
use crate::repositories::{session as session_repo, user as user_repo};
use crate::state::AppState;

/// The memory cost for Argon2 in MB.
const ARGON2_MEMORY_MB: u32 = 19;
/// The number of iterations for Argon2.
const ARGON2_ITERATIONS: u32 = 3;
/// The parallelism factor for Argon2.
const ARGON2_PARALLELISM: u32 = 4;

/// Length of a session token in raw bytes; hex doubles it on the wire.
const SESSION_TOKEN_BYTES: usize = 32;

/// Hashes a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String> {
    let mut password_bytes = password.as_bytes().to_vec();

    let mut salt_bytes = [0u8; 16];
    OsRng.fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Internal(format!("Salt encoding error: {e}")))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        ParamsBuilder::new()
            .m_cost(ARGON2_MEMORY_MB * 1024)
            .t_cost(ARGON2_ITERATIONS)
            .p_cost(ARGON2_PARALLELISM)
            .build()
            .map_err(|e| AppError::Internal(format!("Argon2 params: {e}")))?,
    );

    let password_hash = argon2
        .hash_password(&password_bytes, &salt)
        .map_err(|e| AppError::Internal(format!("Argon2 hash error: {e}")))?
        .to_string();

    password_bytes.zeroize();
    Ok(password_hash)
}

/// Verifies a password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let mut password_bytes = password.as_bytes().to_vec();
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Hash parse error: {e}")))?;
    let result = Argon2::default()
        .verify_password(&password_bytes, &parsed_hash)
        .is_ok();

    password_bytes.zeroize();
    Ok(result)
}

/// Generates an opaque session token: 32 random bytes, hex-encoded.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Mints and persists a fresh session for a user.
async fn mint_session(state: &AppState, user_id: i64) -> Result<Session> {
    let token = generate_session_token();
    let expires_at = Utc::now() + chrono::Duration::days(state.config.session_duration_days);
    session_repo::insert_session(&state.db, user_id, &token, expires_at).await
}

/// Registers a new user and opens their first session.
///
/// Registration does not revoke sessions of any kind; only login does.
pub async fn register(
    state: &AppState,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(AuthUser, Session)> {
    tracing::debug!("📝 Registering user: {}", username);

    let password_hash = hash_password(password)?;
    let user = user_repo::insert_user(&state.db, username, email, &password_hash).await?;
    let session = mint_session(state, user.id).await?;

    tracing::info!("✅ User registered with ID: {}", user.id);
    Ok((AuthUser::from(&user), session))
}

/// Verifies credentials, invalidates the user's prior sessions, and opens a
/// new one.
pub async fn login(state: &AppState, username: &str, password: &str) -> Result<(AuthUser, Session)> {
    tracing::debug!("🔐 Login attempt for: {}", username);

    let user = user_repo::find_by_username(&state.db, username)
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::Authentication(
            "Invalid username or password".to_string(),
        ));
    }

    session_repo::delete_for_user(&state.db, user.id).await?;
    let session = mint_session(state, user.id).await?;

    tracing::info!("✅ User logged in: {}", user.id);
    Ok((AuthUser::from(&user), session))
}

/// Deletes the session behind a token. Best-effort: an unknown token is not
/// an error.
pub async fn logout(state: &AppState, token: &str) -> Result<()> {
    session_repo::delete_by_token(&state.db, token).await?;
    Ok(())
}

/// Updates the caller's username and email and mints a fresh session.
///
/// Other sessions the user holds stay valid; profile updates do not share
/// login's revoke-first behavior.
pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    username: &str,
    email: &str,
) -> Result<Session> {
    user_repo::update_profile(&state.db, user.id, username, email).await?;
    let session = mint_session(state, user.id).await?;

    tracing::info!("✅ Profile updated for user: {}", user.id);
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn session_tokens_are_64_hex_chars_and_unique() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
