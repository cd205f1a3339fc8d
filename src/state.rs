use deadpool_postgres::Pool;
use crate::config::Config;
use crate::error::Result;

/// The application's state, passed explicitly to every handler.
///
/// There is no ambient global store handle: every component that touches the
/// database receives this state (or the pool inside it) as an argument, and
/// connections are acquired per request and returned to the pool on drop.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: Pool,
    /// The application's configuration.
    pub config: Config,
}

impl AppState {
    /// Creates a new `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = crate::db::create_pool(&config.database_url)?;
        tracing::info!("✅ PostgreSQL pool initialized with deadpool-postgres");

        Ok(AppState {
            db,
            config: config.clone(),
        })
    }
}
