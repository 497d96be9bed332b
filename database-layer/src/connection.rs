// Database connection management
use crate::error::{DatabaseError, DatabaseResult};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::{info, warn};

/// Idempotent schema for both collections
///
/// Products live in a JSONB array so "orders containing a product of pharmacy X"
/// is a containment query served by the GIN index.
const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id              TEXT PRIMARY KEY,
        user_id         TEXT NOT NULL,
        products        JSONB NOT NULL DEFAULT '[]'::jsonb,
        no_of_items     INTEGER NOT NULL,
        total_price     NUMERIC NOT NULL,
        contact_number  TEXT NOT NULL,
        patient_address TEXT NOT NULL,
        order_date      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        payment_method  TEXT NOT NULL,
        order_status    TEXT NOT NULL DEFAULT 'Pending'
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_orders_products ON orders USING GIN (products jsonb_path_ops)",
    "CREATE INDEX IF NOT EXISTS idx_orders_user_id ON orders (user_id, order_date DESC)",
    "CREATE INDEX IF NOT EXISTS idx_orders_order_status ON orders (order_status)",
    r#"
    CREATE TABLE IF NOT EXISTS prescriptions (
        id                 TEXT PRIMARY KEY,
        pharmacy_id        TEXT NOT NULL,
        user_id            TEXT NOT NULL,
        patient_name       TEXT NOT NULL,
        contact_number     TEXT NOT NULL,
        prescription_image TEXT NOT NULL,
        notes              TEXT,
        status             TEXT NOT NULL DEFAULT 'Pending',
        created_at         TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_prescriptions_pharmacy_id ON prescriptions (pharmacy_id, created_at DESC)",
];

/// Pool settings
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Database connection pool wrapper
#[derive(Clone, Debug)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Create a new database pool from connection string
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::ConnectionFailed`] when the server is unreachable
    /// or rejects the credentials.
    pub async fn new(connection_string: &str, settings: &PoolSettings) -> DatabaseResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect(connection_string)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        info!(max_connections = settings.max_connections, "Database connection pool created successfully");

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying PgPool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create tables and indexes if they do not exist yet
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::MigrationError`] naming the failing statement.
    pub async fn ensure_schema(&self) -> DatabaseResult<()> {
        for statement in SCHEMA_STATEMENTS {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::MigrationError(format!("{}: {e}", statement.trim())))?;
        }

        info!(statements = SCHEMA_STATEMENTS.len(), "Database schema is up to date");
        Ok(())
    }

    /// Check if the pool is healthy
    pub async fn is_healthy(&self) -> bool {
        match sqlx::query("SELECT 1").fetch_one(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                false
            }
        }
    }

    /// Close the pool
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}
