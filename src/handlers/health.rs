use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::{error::Result, repositories::phone as phone_repo, state::AppState};

#[derive(Serialize)]
pub struct DbCheckResponse {
    pub phones_table_exists: bool,
    pub phone_count: i64,
}

/// Liveness probe.
#[axum::debug_handler]
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        r#"{"status":"healthy","message":"Server is running"}"#,
    )
}

/// Checks that the schema is in place and how much catalog it holds.
#[axum::debug_handler]
pub async fn db_check(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let client = state.db.get().await?;
    let row = client
        .query_one("SELECT to_regclass('public.phones') IS NOT NULL", &[])
        .await?;
    let phones_table_exists: bool = row.get(0);

    let phone_count = if phones_table_exists {
        phone_repo::count_phones(&state.db).await?
    } else {
        0
    };

    Ok(Json(DbCheckResponse {
        phones_table_exists,
        phone_count,
    }))
}
