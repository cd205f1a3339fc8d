use rust_decimal::Decimal;

use crate::{
    error::{AppError, Result},
    models::{
        order::{OrderStatus, OrderWithPhone},
        user::AuthUser,
    },
    repositories::{order as order_repo, phone as phone_repo},
    state::AppState,
};

pub use crate::repositories::order::NewOrder;

/// Unit price at order time times quantity, in exact decimal arithmetic.
/// The result is what the order row stores forever; later price changes on
/// the phone never touch it.
pub fn compute_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Places an order: the one operation in the system that needs
/// cross-statement atomicity.
///
/// The whole sequence runs inside a single transaction on one pooled
/// connection. The phone row is read under `FOR UPDATE`, and the decrement
/// re-checks stock in its WHERE clause, so two concurrent orders can never
/// both drive stock past zero: one of them commits, the other sees the
/// guard fail and rolls back with `InsufficientStock`.
pub async fn place_order(state: &AppState, order: &NewOrder) -> Result<i64> {
    let mut client = state.db.get().await?;
    let tx = client.transaction().await?;

    let (price, stock) = phone_repo::find_for_update(&tx, order.phone_id)
        .await?
        .ok_or(AppError::NotFound("Phone"))?;

    if stock < order.quantity {
        // Dropping the transaction rolls it back; nothing was written yet.
        return Err(AppError::InsufficientStock);
    }

    let total_price = compute_total(price, order.quantity);
    let order_id = order_repo::insert_order(&tx, order, total_price).await?;

    let updated = phone_repo::decrement_stock(&tx, order.phone_id, order.quantity).await?;
    if updated != 1 {
        return Err(AppError::InsufficientStock);
    }

    tx.commit().await?;

    tracing::info!(
        "🛒 Order {} placed: phone {} x{} for {}",
        order_id,
        order.phone_id,
        order.quantity,
        total_price
    );
    Ok(order_id)
}

/// The orders a caller may see: admins get everything, everyone else gets
/// the orders matched to their account.
pub async fn orders_for(state: &AppState, user: &AuthUser) -> Result<Vec<OrderWithPhone>> {
    if user.is_admin {
        order_repo::list_all_with_phone(&state.db).await
    } else {
        order_repo::list_for_customer(&state.db, &user.username).await
    }
}

/// Overwrites an order's status with any member of the valid set.
pub async fn update_status(state: &AppState, order_id: i64, status: OrderStatus) -> Result<()> {
    if !order_repo::update_status(&state.db, order_id, status).await? {
        return Err(AppError::NotFound("Order"));
    }
    tracing::info!("📦 Order {} status set to {}", order_id, status.as_str());
    Ok(())
}

/// Deletes an order permanently. The ordered units are not restocked.
pub async fn delete_order(state: &AppState, order_id: i64) -> Result<()> {
    if !order_repo::delete_order(&state.db, order_id).await? {
        return Err(AppError::NotFound("Order"));
    }
    tracing::info!("🗑️ Order {} deleted", order_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_exact_decimal_arithmetic() {
        let price: Decimal = "999.99".parse().unwrap();
        assert_eq!(compute_total(price, 2), "1999.98".parse().unwrap());
    }

    #[test]
    fn total_for_single_unit_is_the_unit_price() {
        let price: Decimal = "699.99".parse().unwrap();
        assert_eq!(compute_total(price, 1), price);
    }
}
