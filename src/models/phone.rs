use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// Represents a phone in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phone {
    /// The unique identifier for the phone.
    pub id: i64,
    /// The phone's brand.
    pub brand: String,
    /// The phone's model name.
    pub model: String,
    /// The unit price. Never negative.
    pub price: Decimal,
    /// The storage variant, e.g. "128GB".
    pub storage: String,
    /// The color variant.
    pub color: String,
    /// Sellable units currently available. Never negative.
    pub stock_quantity: i32,
    /// Free-text description.
    pub description: String,
    /// Reference to a product image.
    pub image_url: String,
    /// The timestamp when the phone was added.
    pub created_at: DateTime<Utc>,
}

impl From<&Row> for Phone {
    fn from(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            brand: row.get("brand"),
            model: row.get("model"),
            price: row.get("price"),
            storage: row.get("storage"),
            color: row.get("color"),
            stock_quantity: row.get("stock_quantity"),
            description: row.get("description"),
            image_url: row.get("image_url"),
            created_at: row.get("created_at"),
        }
    }
}

/// A row of the stock report: phones ordered by how close they are to
/// running out.
#[derive(Debug, Clone, Serialize)]
pub struct StockReportRow {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub stock_quantity: i32,
    pub price: Decimal,
}

impl From<&Row> for StockReportRow {
    fn from(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            brand: row.get("brand"),
            model: row.get("model"),
            stock_quantity: row.get("stock_quantity"),
            price: row.get("price"),
        }
    }
}
