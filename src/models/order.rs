use chrono::{DateTime, Utc};
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// The lifecycle states of an order.
///
/// This is a flat set: any status may overwrite any other. There is no
/// transition graph restricting, say, delivered back to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSql, FromSql)]
#[postgres(name = "order_status")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[postgres(name = "pending")]
    Pending,
    #[postgres(name = "confirmed")]
    Confirmed,
    #[postgres(name = "shipped")]
    Shipped,
    #[postgres(name = "delivered")]
    Delivered,
    #[postgres(name = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// Parses a status string, returning `None` for anything outside the
    /// valid set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Represents a customer order.
///
/// The order references its phone by id only; the phone row may be deleted
/// later while the order persists. `total_price` is captured at creation and
/// never recomputed.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// The unique identifier for the order.
    pub id: i64,
    /// The id of the ordered phone.
    pub phone_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    /// Units ordered. Always positive.
    pub quantity: i32,
    /// Unit price at order time times quantity.
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub house_number: String,
    pub street_address: String,
    pub delivery_city: String,
    pub delivery_state: String,
    pub delivery_zip: String,
    pub delivery_country: String,
    pub delivery_notes: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Row> for Order {
    fn from(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            phone_id: row.get("phone_id"),
            customer_name: row.get("customer_name"),
            customer_email: row.get("customer_email"),
            customer_phone: row.get("customer_phone"),
            quantity: row.get("quantity"),
            total_price: row.get("total_price"),
            status: row.get("status"),
            house_number: row.get("house_number"),
            street_address: row.get("street_address"),
            delivery_city: row.get("delivery_city"),
            delivery_state: row.get("delivery_state"),
            delivery_zip: row.get("delivery_zip"),
            delivery_country: row.get("delivery_country"),
            delivery_notes: row.get("delivery_notes"),
            created_at: row.get("created_at"),
        }
    }
}

/// An order joined with the phone columns the listings display.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithPhone {
    #[serde(flatten)]
    pub order: Order,
    pub brand: String,
    pub model: String,
    pub storage: String,
    pub color: String,
}

impl From<&Row> for OrderWithPhone {
    fn from(row: &Row) -> Self {
        Self {
            order: Order::from(row),
            brand: row.get("brand"),
            model: row.get("model"),
            storage: row.get("storage"),
            color: row.get("color"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_the_whole_valid_set() {
        for s in ["pending", "confirmed", "shipped", "delivered", "cancelled"] {
            let status = OrderStatus::parse(s).unwrap();
            assert_eq!(status.as_str(), s);
        }
    }

    #[test]
    fn parse_rejects_unknown_and_cased_values() {
        assert_eq!(OrderStatus::parse("completed"), None);
        assert_eq!(OrderStatus::parse("Pending"), None);
        assert_eq!(OrderStatus::parse(""), None);
    }
}
