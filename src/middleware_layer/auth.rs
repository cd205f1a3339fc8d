use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::{
    error::{AppError, Result},
    models::user::AuthUser,
    repositories::session as session_repo,
    state::AppState,
};

const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the bearer token from the Authorization header.
///
/// Anything that does not start with the literal `"Bearer "` prefix is
/// treated as absent, never as a parse error.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
}

/// The session authenticator: resolves the request's bearer token to the
/// owning user's identity.
///
/// A read-only probe with no caching: every protected request re-validates
/// against the store, and expiry is enforced by the lookup itself. A
/// missing, unknown, or expired token yields `None`, not an error.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Option<AuthUser>> {
    let Some(token) = bearer_token(headers) else {
        return Ok(None);
    };
    session_repo::find_user_by_token(&state.db, token).await
}

/// A middleware that requires a valid session of any role.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let user = authenticate(&state, request.headers())
        .await?
        .ok_or(AppError::Unauthorized)?;

    tracing::debug!("✅ User authenticated: {}", user.id);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// The authorization gate: requires a valid session with the admin role.
///
/// Unauthenticated callers get `Unauthorized`; authenticated non-admins get
/// `Forbidden`.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let user = authenticate(&state, request.headers())
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !user.is_admin {
        return Err(AppError::Forbidden);
    }

    tracing::debug!("✅ Admin authenticated: {}", user.id);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_token_after_bearer_prefix() {
        let headers = headers_with_auth("Bearer abc123");
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn missing_header_is_absent() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn malformed_values_are_absent_not_errors() {
        assert_eq!(bearer_token(&headers_with_auth("abc123")), None);
        assert_eq!(bearer_token(&headers_with_auth("bearer abc123")), None);
        assert_eq!(bearer_token(&headers_with_auth("Basic dXNlcjpwdw==")), None);
    }
}
