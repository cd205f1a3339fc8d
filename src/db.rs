use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use rust_decimal::Decimal;
use tokio_postgres::NoTls;
use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::auth;

/// Creates a new database connection pool.
///
/// # Arguments
///
/// * `database_url` - The URL of the PostgreSQL database.
///
/// # Returns
///
/// A `Result` containing the `Pool`.
pub fn create_pool(database_url: &str) -> Result<Pool> {
    let pg_config: tokio_postgres::Config = database_url.parse()?;

    let manager = Manager::from_config(
        pg_config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        },
    );

    Pool::builder(manager)
        .max_size(16)
        .wait_timeout(Some(Duration::from_secs(5)))
        .create_timeout(Some(Duration::from_secs(2)))
        .recycle_timeout(Some(Duration::from_secs(1)))
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build pool: {e}")))
}

/// The four tables of the store. `orders.phone_id` carries no foreign key:
/// deleting a phone must leave its historical orders untouched.
const SCHEMA: &str = r#"
DO $$ BEGIN
    CREATE TYPE order_status AS ENUM
        ('pending', 'confirmed', 'shipped', 'delivered', 'cancelled');
EXCEPTION
    WHEN duplicate_object THEN NULL;
END $$;

CREATE TABLE IF NOT EXISTS phones (
    id             BIGSERIAL PRIMARY KEY,
    brand          TEXT NOT NULL,
    model          TEXT NOT NULL,
    price          NUMERIC(10,2) NOT NULL CHECK (price >= 0),
    storage        TEXT NOT NULL,
    color          TEXT NOT NULL,
    stock_quantity INTEGER NOT NULL CHECK (stock_quantity >= 0),
    description    TEXT NOT NULL DEFAULT '',
    image_url      TEXT NOT NULL DEFAULT '',
    created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS orders (
    id               BIGSERIAL PRIMARY KEY,
    phone_id         BIGINT NOT NULL,
    customer_name    TEXT NOT NULL,
    customer_email   TEXT NOT NULL,
    customer_phone   TEXT NOT NULL,
    quantity         INTEGER NOT NULL CHECK (quantity > 0),
    total_price      NUMERIC(12,2) NOT NULL,
    status           order_status NOT NULL DEFAULT 'pending',
    house_number     TEXT NOT NULL,
    street_address   TEXT NOT NULL,
    delivery_city    TEXT NOT NULL,
    delivery_state   TEXT NOT NULL,
    delivery_zip     TEXT NOT NULL,
    delivery_country TEXT NOT NULL,
    delivery_notes   TEXT NOT NULL DEFAULT '',
    created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS users (
    id            BIGSERIAL PRIMARY KEY,
    username      TEXT UNIQUE NOT NULL,
    email         TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    is_admin      BOOLEAN NOT NULL DEFAULT FALSE,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS sessions (
    id            BIGSERIAL PRIMARY KEY,
    user_id       BIGINT NOT NULL REFERENCES users (id),
    session_token TEXT UNIQUE NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    expires_at    TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sessions_user_id ON sessions (user_id);
CREATE INDEX IF NOT EXISTS idx_orders_phone_id ON orders (phone_id);
"#;

/// Creates the tables if they do not exist yet. Idempotent.
pub async fn init_schema(pool: &Pool) -> Result<()> {
    tracing::info!("🔧 Starting database initialization...");
    let client = pool.get().await?;
    client.batch_execute(SCHEMA).await?;
    tracing::info!("✅ Tables checked/created");
    Ok(())
}

/// Seeds sample phones and the default accounts on a fresh database.
///
/// Runs only when the users table is empty, so existing data is preserved
/// across restarts.
pub async fn seed_if_empty(pool: &Pool, config: &Config) -> Result<()> {
    let client = pool.get().await?;

    let row = client.query_one("SELECT COUNT(*) FROM users", &[]).await?;
    let user_count: i64 = row.get(0);
    if user_count > 0 {
        tracing::info!("📊 Using existing database with preserved data");
        return Ok(());
    }

    tracing::info!("📝 Inserting sample data...");

    let sample_phones: [(&str, &str, Decimal, &str, &str, i32, &str, &str); 4] = [
        (
            "iPhone", "15 Pro", Decimal::new(99999, 2), "128GB", "Titanium Blue", 50,
            "Latest iPhone with A17 Pro chip",
            "https://store.storeimages.cdn-apple.com/4982/as-images.apple.com/is/iphone-15-pro",
        ),
        (
            "Samsung", "Galaxy S24", Decimal::new(79999, 2), "256GB", "Phantom Black", 30,
            "Samsung flagship with advanced AI features",
            "https://images.samsung.com/is/image/samsung/p6pim/levant/2401/gallery/galaxy-s24",
        ),
        (
            "Google", "Pixel 8 Pro", Decimal::new(89999, 2), "128GB", "Obsidian", 25,
            "Google AI-powered smartphone with best-in-class camera",
            "https://store.google.com/product/pixel_8_pro",
        ),
        (
            "OnePlus", "12", Decimal::new(69999, 2), "256GB", "Silky Black", 40,
            "Flagship killer with Hasselblad camera",
            "https://image01.oneplus.net/ebp/202310/13/oneplus-12.png",
        ),
    ];

    for (brand, model, price, storage, color, stock, description, image_url) in &sample_phones {
        client
            .execute(
                r#"
                INSERT INTO phones
                    (brand, model, price, storage, color, stock_quantity, description, image_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
                &[brand, model, price, storage, color, stock, description, image_url],
            )
            .await?;
    }
    tracing::info!("✅ Added {} sample phones", sample_phones.len());

    let admin_hash = auth::hash_password(&config.admin_password)?;
    client
        .execute(
            "INSERT INTO users (username, email, password_hash, is_admin) VALUES ($1, $2, $3, TRUE)",
            &[&config.admin_username, &config.admin_email, &admin_hash],
        )
        .await?;

    let user_hash = auth::hash_password("user123")?;
    client
        .execute(
            "INSERT INTO users (username, email, password_hash, is_admin) VALUES ($1, $2, $3, FALSE)",
            &[&"user", &"user@example.com", &user_hash],
        )
        .await?;

    client
        .execute(
            r#"
            INSERT INTO orders
                (phone_id, customer_name, customer_email, customer_phone, quantity, total_price,
                 status, house_number, street_address, delivery_city, delivery_state,
                 delivery_zip, delivery_country)
            VALUES (1, 'John Doe', 'user@example.com', '123-456-7890', 1, $1, 'delivered',
                    '123', 'Main Street', 'New York', 'NY', '10001', 'USA')
            "#,
            &[&Decimal::new(99999, 2)],
        )
        .await?;
    client
        .execute(
            r#"
            INSERT INTO orders
                (phone_id, customer_name, customer_email, customer_phone, quantity, total_price,
                 status, house_number, street_address, delivery_city, delivery_state,
                 delivery_zip, delivery_country)
            VALUES (2, 'Jane Smith', 'admin@phonestore.com', '098-765-4321', 2, $1, 'pending',
                    '456', 'Oak Avenue', 'Los Angeles', 'CA', '90210', 'USA')
            "#,
            &[&Decimal::new(159998, 2)],
        )
        .await?;

    tracing::info!("✅ Admin user created: {}", config.admin_username);
    tracing::info!("🎉 Database initialization completed successfully!");
    Ok(())
}
