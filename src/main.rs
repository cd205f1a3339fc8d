use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};

use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod state;
mod db;

mod models {
    pub mod order;
    pub mod phone;
    pub mod session;
    pub mod user;
}

mod repositories {
    pub mod order;
    pub mod phone;
    pub mod reports;
    pub mod session;
    pub mod user;
}

mod services {
    pub mod auth;
    pub mod orders;
    pub mod reports;
}

mod handlers {
    pub mod auth;
    pub mod health;
    pub mod orders;
    pub mod phones;
    pub mod reports;
    pub mod users;
}

mod middleware_layer {
    pub mod auth;
}

mod validation {
    pub mod auth;
    pub mod orders;
    pub mod phones;
}

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    tracing::info!("🚀 Starting PhoneTech Server...");

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config).await?;

    db::init_schema(&state.db).await?;
    db::seed_if_empty(&state.db, &config).await?;

    // Auth is header-based, no cookies, so CORS can stay permissive.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let credential_governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(5)
            .burst_size(20)
            .finish()
            .unwrap(),
    );

    // Register/login take the brunt of brute-force traffic; they get their
    // own rate limit keyed by peer IP.
    let credential_routes = Router::new()
        .route("/api/register", post(handlers::auth::register))
        .route("/api/login", post(handlers::auth::login))
        .layer(tower_governor::GovernorLayer::new(credential_governor_conf))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/api/health", get(handlers::health::health_check))
        .route("/api/db-check", get(handlers::health::db_check))
        .route("/api/phones", get(handlers::phones::list_phones))
        .route("/api/phones/{phone_id}", get(handlers::phones::get_phone))
        .route("/api/logout", post(handlers::auth::logout))
        .with_state(state.clone());

    let user_routes = Router::new()
        .route("/api/user", get(handlers::auth::current_user))
        .route("/api/user/profile", put(handlers::auth::update_profile))
        .route("/api/user/orders", get(handlers::orders::user_orders))
        .route(
            "/api/orders",
            post(handlers::orders::place_order).get(handlers::orders::list_orders),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state.clone());

    let admin_routes = Router::new()
        .route("/api/admin/phones", post(handlers::phones::create_phone))
        .route(
            "/api/admin/phones/{phone_id}",
            put(handlers::phones::update_phone).delete(handlers::phones::delete_phone),
        )
        .route("/api/admin/users", get(handlers::users::list_users))
        .route("/api/admin/users/{user_id}", delete(handlers::users::delete_user))
        .route("/api/admin/stats", get(handlers::reports::admin_stats))
        .route("/api/reports/sales", get(handlers::reports::sales_report))
        .route("/api/reports/stock", get(handlers::reports::stock_report))
        .route("/api/reports/orders", get(handlers::reports::orders_report))
        .route(
            "/api/orders/{order_id}/status",
            put(handlers::orders::update_status),
        )
        .route("/api/orders/{order_id}", delete(handlers::orders::delete_order))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_admin,
        ))
        .with_state(state.clone());

    let app = Router::new()
        .merge(credential_routes)
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);
    tracing::info!("🔧 Health Check: http://{}/api/health", addr);
    tracing::info!("📊 DB Check: http://{}/api/db-check", addr);
    tracing::info!("✅ All systems operational");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
