use deadpool_postgres::{Pool, Transaction};
use rust_decimal::Decimal;
use tokio_postgres::types::ToSql;

use crate::{
    error::{AppError, Result},
    models::phone::{Phone, StockReportRow},
};

/// The fields required to create a phone.
#[derive(Debug, Clone)]
pub struct NewPhone {
    pub brand: String,
    pub model: String,
    pub price: Decimal,
    pub storage: String,
    pub color: String,
    pub stock_quantity: i32,
    pub description: String,
    pub image_url: String,
}

/// A partial update: only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct PhoneChanges {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<Decimal>,
    pub storage: Option<String>,
    pub color: Option<String>,
    pub stock_quantity: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Lists the whole catalog, newest first.
pub async fn list_phones(pool: &Pool) -> Result<Vec<Phone>> {
    let client = pool.get().await?;
    let rows = client
        .query("SELECT * FROM phones ORDER BY id DESC", &[])
        .await?;
    Ok(rows.iter().map(Phone::from).collect())
}

/// Finds a phone by its id.
pub async fn find_phone(pool: &Pool, phone_id: i64) -> Result<Option<Phone>> {
    let client = pool.get().await?;
    let row = client
        .query_opt("SELECT * FROM phones WHERE id = $1", &[&phone_id])
        .await?;
    Ok(row.as_ref().map(Phone::from))
}

/// Inserts a new phone and returns its id.
pub async fn insert_phone(pool: &Pool, phone: &NewPhone) -> Result<i64> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO phones
                (brand, model, price, storage, color, stock_quantity, description, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
            &[
                &phone.brand,
                &phone.model,
                &phone.price,
                &phone.storage,
                &phone.color,
                &phone.stock_quantity,
                &phone.description,
                &phone.image_url,
            ],
        )
        .await?;
    Ok(row.get("id"))
}

/// Applies a partial update. Returns `false` when the phone does not exist.
pub async fn update_phone(pool: &Pool, phone_id: i64, changes: &PhoneChanges) -> Result<bool> {
    let mut sets: Vec<String> = Vec::new();
    let mut params: Vec<&(dyn ToSql + Sync)> = Vec::new();

    if let Some(ref v) = changes.brand {
        params.push(v);
        sets.push(format!("brand = ${}", params.len()));
    }
    if let Some(ref v) = changes.model {
        params.push(v);
        sets.push(format!("model = ${}", params.len()));
    }
    if let Some(ref v) = changes.price {
        params.push(v);
        sets.push(format!("price = ${}", params.len()));
    }
    if let Some(ref v) = changes.storage {
        params.push(v);
        sets.push(format!("storage = ${}", params.len()));
    }
    if let Some(ref v) = changes.color {
        params.push(v);
        sets.push(format!("color = ${}", params.len()));
    }
    if let Some(ref v) = changes.stock_quantity {
        params.push(v);
        sets.push(format!("stock_quantity = ${}", params.len()));
    }
    if let Some(ref v) = changes.description {
        params.push(v);
        sets.push(format!("description = ${}", params.len()));
    }
    if let Some(ref v) = changes.image_url {
        params.push(v);
        sets.push(format!("image_url = ${}", params.len()));
    }

    if sets.is_empty() {
        return Err(AppError::Validation("No valid fields to update".to_string()));
    }

    params.push(&phone_id);
    let query = format!(
        "UPDATE phones SET {} WHERE id = ${}",
        sets.join(", "),
        params.len()
    );

    let client = pool.get().await?;
    let updated = client.execute(&query, &params).await?;
    Ok(updated > 0)
}

/// Deletes a phone. Historical orders referencing it are left untouched.
pub async fn delete_phone(pool: &Pool, phone_id: i64) -> Result<bool> {
    let client = pool.get().await?;
    let deleted = client
        .execute("DELETE FROM phones WHERE id = $1", &[&phone_id])
        .await?;
    Ok(deleted > 0)
}

/// Reads price and stock under a row lock, for use inside the order
/// placement transaction.
pub async fn find_for_update(
    tx: &Transaction<'_>,
    phone_id: i64,
) -> Result<Option<(Decimal, i32)>> {
    let row = tx
        .query_opt(
            "SELECT price, stock_quantity FROM phones WHERE id = $1 FOR UPDATE",
            &[&phone_id],
        )
        .await?;
    Ok(row.map(|r| (r.get("price"), r.get("stock_quantity"))))
}

/// Conditionally decrements stock inside the order placement transaction.
///
/// The `stock_quantity >= $1` guard makes the decrement atomic with its own
/// re-check, so the affected-row count tells the caller whether the stock
/// invariant held. Returns that count.
pub async fn decrement_stock(tx: &Transaction<'_>, phone_id: i64, quantity: i32) -> Result<u64> {
    let updated = tx
        .execute(
            r#"
            UPDATE phones
            SET stock_quantity = stock_quantity - $1
            WHERE id = $2 AND stock_quantity >= $1
            "#,
            &[&quantity, &phone_id],
        )
        .await?;
    Ok(updated)
}

/// Phones ordered by ascending stock, for the stock report.
pub async fn stock_report(pool: &Pool) -> Result<Vec<StockReportRow>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            "SELECT id, brand, model, stock_quantity, price FROM phones ORDER BY stock_quantity ASC",
            &[],
        )
        .await?;
    Ok(rows.iter().map(StockReportRow::from).collect())
}

/// Counts catalog rows, for the db-check endpoint.
pub async fn count_phones(pool: &Pool) -> Result<i64> {
    let client = pool.get().await?;
    let row = client.query_one("SELECT COUNT(*) FROM phones", &[]).await?;
    Ok(row.get(0))
}
