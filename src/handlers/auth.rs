use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    middleware_layer::auth::bearer_token,
    models::user::AuthUser,
    services::auth as auth_service,
    state::AppState,
    validation::auth::*,
};

/// The request payload for user registration.
#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// The request payload for user login.
#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// The request payload for a profile update.
#[derive(Deserialize, Debug)]
pub struct ProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// The response payload carrying a fresh session token.
#[derive(Serialize)]
pub struct AuthSessionResponse {
    pub message: String,
    pub session_token: String,
    pub user: AuthUser,
}

/// The response payload for the current-user probe.
#[derive(Serialize)]
pub struct CurrentUserResponse {
    pub user: AuthUser,
}

/// Handles user registration. New accounts never start as admins.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let (Some(username), Some(email), Some(password)) = (
        non_blank(payload.username.as_deref()),
        non_blank(payload.email.as_deref()),
        non_blank(payload.password.as_deref()),
    ) else {
        return Err(AppError::Validation("All fields are required".to_string()));
    };

    validate_username(username)?;
    validate_email(email)?;
    validate_password(password)?;

    let (user, session) = auth_service::register(&state, username, email, password).await?;

    let response = AuthSessionResponse {
        message: "Registration successful".to_string(),
        session_token: session.session_token,
        user,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handles user login. A successful login invalidates the user's previous
/// session tokens.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let (Some(username), Some(password)) = (
        non_blank(payload.username.as_deref()),
        non_blank(payload.password.as_deref()),
    ) else {
        return Err(AppError::Validation(
            "Username and password are required".to_string(),
        ));
    };

    let (user, session) = auth_service::login(&state, username, password).await?;

    let response = AuthSessionResponse {
        message: "Login successful".to_string(),
        session_token: session.session_token,
        user,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Handles logout. Best-effort: succeeds whether or not the header carried
/// a live token.
#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    if let Some(token) = bearer_token(&headers) {
        auth_service::logout(&state, token).await?;
        tracing::info!("👋 Session deleted on logout");
    }

    Ok((StatusCode::OK, r#"{"message":"Logout successful"}"#).into_response())
}

/// Returns the identity behind the caller's session.
#[axum::debug_handler]
pub async fn current_user(Extension(user): Extension<AuthUser>) -> Result<impl IntoResponse> {
    Ok(Json(CurrentUserResponse { user }))
}

/// Updates the caller's username and email and hands back a fresh session
/// token.
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ProfileRequest>,
) -> Result<impl IntoResponse> {
    let (Some(username), Some(email)) = (
        non_blank(payload.username.as_deref()),
        non_blank(payload.email.as_deref()),
    ) else {
        return Err(AppError::Validation(
            "Username and email are required".to_string(),
        ));
    };

    validate_username(username)?;
    validate_email(email)?;

    let session = auth_service::update_profile(&state, &user, username, email).await?;

    let response = AuthSessionResponse {
        message: "Profile updated successfully".to_string(),
        session_token: session.session_token,
        user: AuthUser {
            id: user.id,
            username: username.to_string(),
            email: email.to_string(),
            is_admin: user.is_admin,
        },
    };
    Ok((StatusCode::OK, Json(response)))
}
