use deadpool_postgres::{Pool, Transaction};
use rust_decimal::Decimal;

use crate::{
    error::Result,
    models::order::{OrderStatus, OrderWithPhone},
};

/// The validated fields of an order request, ready to persist.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub phone_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub quantity: i32,
    pub house_number: String,
    pub street_address: String,
    pub delivery_city: String,
    pub delivery_state: String,
    pub delivery_zip: String,
    pub delivery_country: String,
    pub delivery_notes: String,
}

/// Inserts an order with status `pending` inside the placement transaction.
/// Returns the new order id.
pub async fn insert_order(
    tx: &Transaction<'_>,
    order: &NewOrder,
    total_price: Decimal,
) -> Result<i64> {
    let row = tx
        .query_one(
            r#"
            INSERT INTO orders
                (phone_id, customer_name, customer_email, customer_phone, quantity, total_price,
                 house_number, street_address, delivery_city, delivery_state, delivery_zip,
                 delivery_country, delivery_notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
            &[
                &order.phone_id,
                &order.customer_name,
                &order.customer_email,
                &order.customer_phone,
                &order.quantity,
                &total_price,
                &order.house_number,
                &order.street_address,
                &order.delivery_city,
                &order.delivery_state,
                &order.delivery_zip,
                &order.delivery_country,
                &order.delivery_notes,
            ],
        )
        .await?;
    Ok(row.get("id"))
}

/// All orders joined with their phone, newest first.
pub async fn list_all_with_phone(pool: &Pool) -> Result<Vec<OrderWithPhone>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT o.*, p.brand, p.model, p.storage, p.color
            FROM orders o
            JOIN phones p ON o.phone_id = p.id
            ORDER BY o.created_at DESC
            "#,
            &[],
        )
        .await?;
    Ok(rows.iter().map(OrderWithPhone::from).collect())
}

/// Orders belonging to a customer, matched on name or email the way the
/// store has always matched them: against the account's username.
pub async fn list_for_customer(pool: &Pool, username: &str) -> Result<Vec<OrderWithPhone>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT o.*, p.brand, p.model, p.storage, p.color
            FROM orders o
            JOIN phones p ON o.phone_id = p.id
            WHERE o.customer_name = $1 OR o.customer_email = $1
            ORDER BY o.created_at DESC
            "#,
            &[&username],
        )
        .await?;
    Ok(rows.iter().map(OrderWithPhone::from).collect())
}

/// Overwrites an order's status. Returns `false` for an unknown order.
pub async fn update_status(pool: &Pool, order_id: i64, status: OrderStatus) -> Result<bool> {
    let client = pool.get().await?;
    let updated = client
        .execute(
            "UPDATE orders SET status = $1 WHERE id = $2",
            &[&status, &order_id],
        )
        .await?;
    Ok(updated > 0)
}

/// Removes an order permanently. Stock is not returned to the phone.
pub async fn delete_order(pool: &Pool, order_id: i64) -> Result<bool> {
    let client = pool.get().await?;
    let deleted = client
        .execute("DELETE FROM orders WHERE id = $1", &[&order_id])
        .await?;
    Ok(deleted > 0)
}
