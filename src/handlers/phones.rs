use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    error::{AppError, Result},
    models::phone::Phone,
    repositories::phone as phone_repo,
    state::AppState,
    validation::phones::{validate_new_phone, validate_phone_changes, PhoneRequest},
};

/// The public catalog listing.
#[derive(Serialize)]
pub struct PhonesResponse {
    pub phones: Vec<Phone>,
}

/// The response payload for a newly created catalog entry.
#[derive(Serialize)]
pub struct PhoneCreatedResponse {
    pub message: String,
    pub phone_id: i64,
}

/// Lists the catalog. Public, no session required.
#[axum::debug_handler]
pub async fn list_phones(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let phones = phone_repo::list_phones(&state.db).await?;
    Ok(Json(PhonesResponse { phones }))
}

/// Fetches one phone. Public.
#[axum::debug_handler]
pub async fn get_phone(
    State(state): State<AppState>,
    Path(phone_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let phone = phone_repo::find_phone(&state.db, phone_id)
        .await?
        .ok_or(AppError::NotFound("Phone"))?;
    Ok(Json(phone))
}

/// Adds a phone to the catalog. Admin only.
#[axum::debug_handler]
pub async fn create_phone(
    State(state): State<AppState>,
    Json(payload): Json<PhoneRequest>,
) -> Result<impl IntoResponse> {
    let phone = validate_new_phone(payload)?;
    let phone_id = phone_repo::insert_phone(&state.db, &phone).await?;

    tracing::info!("📱 Phone {} added: {} {}", phone_id, phone.brand, phone.model);

    let response = PhoneCreatedResponse {
        message: "Phone added successfully".to_string(),
        phone_id,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Partially updates a phone. Admin only.
#[axum::debug_handler]
pub async fn update_phone(
    State(state): State<AppState>,
    Path(phone_id): Path<i64>,
    Json(payload): Json<PhoneRequest>,
) -> Result<Response> {
    let changes = validate_phone_changes(payload)?;
    if !phone_repo::update_phone(&state.db, phone_id, &changes).await? {
        return Err(AppError::NotFound("Phone"));
    }

    Ok((StatusCode::OK, r#"{"message":"Phone updated successfully"}"#).into_response())
}

/// Removes a phone from the catalog. Admin only. Historical orders keep
/// referencing the dead id.
#[axum::debug_handler]
pub async fn delete_phone(
    State(state): State<AppState>,
    Path(phone_id): Path<i64>,
) -> Result<Response> {
    if !phone_repo::delete_phone(&state.db, phone_id).await? {
        return Err(AppError::NotFound("Phone"));
    }

    tracing::info!("🗑️ Phone {} deleted", phone_id);
    Ok((StatusCode::OK, r#"{"message":"Phone deleted successfully"}"#).into_response())
}
