//! Persistence layer for the pharmacy orders API
//!
//! This crate owns everything the HTTP layer needs to store and query orders
//! and prescriptions:
//!
//! - Domain records and their wire shapes ([`models`])
//! - Store traits ([`OrderStore`], [`PrescriptionStore`]) with a PostgreSQL
//!   implementation and an in-memory one for development and tests
//! - 24-hex-character record identifiers ([`RecordId`])
//! - Order-date rendering in Asia/Colombo civil time ([`OrderTimestamp`])
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use database_layer::{DatabasePool, OrderStore, PgOrderRepository, PoolSettings};
//!
//! # async fn run() -> Result<(), database_layer::DatabaseError> {
//! let pool = DatabasePool::new("postgresql://localhost/pharmacy", &PoolSettings::default()).await?;
//! pool.ensure_schema().await?;
//!
//! let orders = PgOrderRepository::new(pool);
//! let count = orders.count_by_pharmacy("ph-001").await?;
//! println!("{count} orders");
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod memory;
pub mod models;
pub mod order_repository;
pub mod prescription_repository;
pub mod record_id;
pub mod timestamps;

pub use connection::{DatabasePool, PoolSettings};
pub use error::{DatabaseError, DatabaseResult};
pub use memory::{MemoryOrderStore, MemoryPrescriptionStore};
pub use models::*;
pub use order_repository::{OrderStore, PgOrderRepository};
pub use prescription_repository::{PgPrescriptionRepository, PrescriptionStore};
pub use record_id::RecordId;
pub use timestamps::OrderTimestamp;
