use crate::{
    error::Result,
    models::{order::OrderWithPhone, phone::StockReportRow},
    repositories::{order as order_repo, phone as phone_repo, reports as reports_repo},
    repositories::reports::{DashboardStats, SalesReportRow},
    state::AppState,
};

/// Dashboard counters for the admin overview.
pub async fn dashboard_stats(state: &AppState) -> Result<DashboardStats> {
    reports_repo::dashboard_stats(&state.db).await
}

/// Per-phone sales totals, unsold phones included.
pub async fn sales_report(state: &AppState) -> Result<Vec<SalesReportRow>> {
    reports_repo::sales_report(&state.db).await
}

/// Phones ordered by how close they are to running out.
pub async fn stock_report(state: &AppState) -> Result<Vec<StockReportRow>> {
    phone_repo::stock_report(&state.db).await
}

/// Every order with its phone details, newest first.
pub async fn orders_report(state: &AppState) -> Result<Vec<OrderWithPhone>> {
    order_repo::list_all_with_phone(&state.db).await
}
