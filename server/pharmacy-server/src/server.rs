use std::sync::Arc;
use std::time::Instant;

use database_layer::{
    DatabasePool, MemoryOrderStore, MemoryPrescriptionStore, OrderStore, PgOrderRepository,
    PgPrescriptionRepository, PrescriptionStore,
};

use crate::config::ServerConfig;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct PharmacyServer {
    /// Server configuration
    pub config: ServerConfig,
    /// Order persistence
    pub orders: Arc<dyn OrderStore>,
    /// Prescription persistence
    pub prescriptions: Arc<dyn PrescriptionStore>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
    db_pool: Option<DatabasePool>,
}

impl PharmacyServer {
    /// Create a server backed by PostgreSQL repositories on the given pool
    pub fn with_database(config: ServerConfig, db_pool: DatabasePool) -> Self {
        Self {
            config,
            orders: Arc::new(PgOrderRepository::new(db_pool.clone())),
            prescriptions: Arc::new(PgPrescriptionRepository::new(db_pool.clone())),
            started_at: Instant::now(),
            db_pool: Some(db_pool),
        }
    }

    /// Create a server whose records live in process memory
    /// This is useful for testing
    pub fn in_memory(config: ServerConfig) -> Self {
        Self::with_stores(
            config,
            Arc::new(MemoryOrderStore::new()),
            Arc::new(MemoryPrescriptionStore::new()),
        )
    }

    /// Create a server over arbitrary store implementations
    pub fn with_stores(
        config: ServerConfig,
        orders: Arc<dyn OrderStore>,
        prescriptions: Arc<dyn PrescriptionStore>,
    ) -> Self {
        Self {
            config,
            orders,
            prescriptions,
            started_at: Instant::now(),
            db_pool: None,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Release the database pool, if any
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.db_pool {
            pool.close().await;
        }
    }
}
