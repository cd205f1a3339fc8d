use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;

use crate::{
    error::{AppError, Result},
    models::user::{AuthUser, UserSummary},
    repositories::user as user_repo,
    state::AppState,
};

/// The admin user listing.
#[derive(Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserSummary>,
}

/// Lists all accounts. Admin only; password hashes are never exposed.
#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = user_repo::list_users(&state.db).await?;
    Ok(Json(UsersResponse { users }))
}

/// Deletes an account and its sessions. Admin only; admins cannot delete
/// themselves.
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthUser>,
    Path(user_id): Path<i64>,
) -> Result<Response> {
    if admin.id == user_id {
        return Err(AppError::Validation(
            "Cannot delete your own account".to_string(),
        ));
    }

    if !user_repo::delete_user(&state.db, user_id).await? {
        return Err(AppError::NotFound("User"));
    }

    tracing::info!("🗑️ User {} deleted by admin {}", user_id, admin.id);
    Ok((StatusCode::OK, r#"{"message":"User deleted successfully"}"#).into_response())
}
