use deadpool_postgres::Pool;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio_postgres::Row;

use crate::error::Result;

/// The admin dashboard counters.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_orders: i64,
    /// Revenue over all non-cancelled orders.
    pub total_revenue: Decimal,
    /// Phones with 1..=10 units left.
    pub low_stock_items: i64,
    pub out_of_stock_items: i64,
    pub recent_orders_7days: i64,
}

/// One phone's sales totals. Unsold phones appear with zero counts.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReportRow {
    pub brand: String,
    pub model: String,
    pub orders_count: i64,
    pub total_quantity: i64,
    pub total_revenue: Decimal,
}

impl From<&Row> for SalesReportRow {
    fn from(row: &Row) -> Self {
        Self {
            brand: row.get("brand"),
            model: row.get("model"),
            orders_count: row.get("orders_count"),
            total_quantity: row.get("total_quantity"),
            total_revenue: row.get("total_revenue"),
        }
    }
}

/// Computes the dashboard counters.
pub async fn dashboard_stats(pool: &Pool) -> Result<DashboardStats> {
    let client = pool.get().await?;

    let total_users: i64 = client
        .query_one("SELECT COUNT(*) FROM users", &[])
        .await?
        .get(0);

    let total_orders: i64 = client
        .query_one("SELECT COUNT(*) FROM orders", &[])
        .await?
        .get(0);

    let total_revenue: Decimal = client
        .query_one(
            "SELECT COALESCE(SUM(total_price), 0) FROM orders WHERE status <> 'cancelled'",
            &[],
        )
        .await?
        .get(0);

    let low_stock_items: i64 = client
        .query_one(
            "SELECT COUNT(*) FROM phones WHERE stock_quantity <= 10 AND stock_quantity > 0",
            &[],
        )
        .await?
        .get(0);

    let out_of_stock_items: i64 = client
        .query_one("SELECT COUNT(*) FROM phones WHERE stock_quantity = 0", &[])
        .await?
        .get(0);

    let recent_orders_7days: i64 = client
        .query_one(
            "SELECT COUNT(*) FROM orders WHERE created_at >= NOW() - INTERVAL '7 days'",
            &[],
        )
        .await?
        .get(0);

    Ok(DashboardStats {
        total_users,
        total_orders,
        total_revenue,
        low_stock_items,
        out_of_stock_items,
        recent_orders_7days,
    })
}

/// Per-phone sales totals. The LEFT JOIN keeps phones that never sold.
pub async fn sales_report(pool: &Pool) -> Result<Vec<SalesReportRow>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT p.brand, p.model,
                   COUNT(o.id) AS orders_count,
                   COALESCE(SUM(o.quantity), 0)::BIGINT AS total_quantity,
                   COALESCE(SUM(o.total_price), 0) AS total_revenue
            FROM phones p
            LEFT JOIN orders o ON o.phone_id = p.id
            GROUP BY p.id, p.brand, p.model
            ORDER BY p.id
            "#,
            &[],
        )
        .await?;
    Ok(rows.iter().map(SalesReportRow::from).collect())
}
