use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    models::{
        order::{OrderStatus, OrderWithPhone},
        user::AuthUser,
    },
    services::orders as order_service,
    state::AppState,
    validation::orders::{validate_order, OrderRequest},
};

/// The response payload for a placed order.
#[derive(Serialize)]
pub struct OrderPlacedResponse {
    pub message: String,
    pub order_id: i64,
}

/// The full order listing, as admins see it.
#[derive(Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<OrderWithPhone>,
}

/// The request payload for a status change.
#[derive(Deserialize, Debug)]
pub struct StatusRequest {
    pub status: Option<String>,
}

/// An order as its customer sees it: no street-level address, city and
/// state masked.
#[derive(Serialize)]
pub struct CustomerOrderView {
    pub id: i64,
    pub phone_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub quantity: i32,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub brand: String,
    pub model: String,
    pub storage: String,
    pub color: String,
    pub delivery_city: &'static str,
    pub delivery_state: &'static str,
}

impl From<&OrderWithPhone> for CustomerOrderView {
    fn from(o: &OrderWithPhone) -> Self {
        Self {
            id: o.order.id,
            phone_id: o.order.phone_id,
            customer_name: o.order.customer_name.clone(),
            customer_email: o.order.customer_email.clone(),
            customer_phone: o.order.customer_phone.clone(),
            quantity: o.order.quantity,
            total_price: o.order.total_price,
            status: o.order.status,
            created_at: o.order.created_at,
            brand: o.brand.clone(),
            model: o.model.clone(),
            storage: o.storage.clone(),
            color: o.color.clone(),
            delivery_city: "***",
            delivery_state: "***",
        }
    }
}

#[derive(Serialize)]
struct CustomerOrdersResponse {
    orders: Vec<CustomerOrderView>,
}

/// Places an order for the authenticated caller.
#[axum::debug_handler]
pub async fn place_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<OrderRequest>,
) -> Result<impl IntoResponse> {
    let order = validate_order(payload)?;
    let order_id = order_service::place_order(&state, &order).await?;

    tracing::info!("✅ Order {} placed by user {}", order_id, user.id);

    let response = OrderPlacedResponse {
        message: "Order placed successfully".to_string(),
        order_id,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// The caller's order history. Admins see every order with full delivery
/// addresses; everyone else sees their own orders with the address masked.
#[axum::debug_handler]
pub async fn user_orders(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response> {
    let orders = order_service::orders_for(&state, &user).await?;

    if user.is_admin {
        return Ok(Json(OrdersResponse { orders }).into_response());
    }

    let orders = orders.iter().map(CustomerOrderView::from).collect();
    Ok(Json(CustomerOrdersResponse { orders }).into_response())
}

/// The complete order book. Admin only; the role check lives here because
/// the route shares its path with order placement.
#[axum::debug_handler]
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    if !user.is_admin {
        return Err(AppError::Forbidden);
    }

    let orders = crate::services::reports::orders_report(&state).await?;
    Ok(Json(OrdersResponse { orders }))
}

/// Overwrites an order's status. Admin only; any valid status may replace
/// any other.
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(payload): Json<StatusRequest>,
) -> Result<Response> {
    let status = payload
        .status
        .as_deref()
        .ok_or_else(|| AppError::Validation("Status is required".to_string()))?;
    let status = OrderStatus::parse(status)
        .ok_or_else(|| AppError::Validation("Invalid status".to_string()))?;

    order_service::update_status(&state, order_id, status).await?;
    Ok((StatusCode::OK, r#"{"message":"Order status updated successfully"}"#).into_response())
}

/// Deletes an order permanently. Admin only. Does not restock the phone.
#[axum::debug_handler]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> Result<Response> {
    order_service::delete_order(&state, order_id).await?;
    Ok((StatusCode::OK, r#"{"message":"Order deleted successfully"}"#).into_response())
}
