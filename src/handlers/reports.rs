use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

use crate::{
    error::Result,
    models::phone::StockReportRow,
    repositories::reports::SalesReportRow,
    services::reports as report_service,
    state::AppState,
};

#[derive(Serialize)]
pub struct SalesResponse {
    pub sales: Vec<SalesReportRow>,
}

#[derive(Serialize)]
pub struct StockResponse {
    pub stock: Vec<StockReportRow>,
}

/// Dashboard counters. Admin only.
#[axum::debug_handler]
pub async fn admin_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = report_service::dashboard_stats(&state).await?;
    Ok(Json(stats))
}

/// Per-phone sales totals. Admin only.
#[axum::debug_handler]
pub async fn sales_report(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let sales = report_service::sales_report(&state).await?;
    Ok(Json(SalesResponse { sales }))
}

/// Stock levels, lowest first. Admin only.
#[axum::debug_handler]
pub async fn stock_report(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stock = report_service::stock_report(&state).await?;
    Ok(Json(StockResponse { stock }))
}

/// Every order with phone details. Admin only.
#[axum::debug_handler]
pub async fn orders_report(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let orders = report_service::orders_report(&state).await?;
    Ok(Json(crate::handlers::orders::OrdersResponse { orders }))
}
