//! Command line and environment configuration

use std::time::Duration;

use clap::{Parser, ValueEnum};
use database_layer::PoolSettings;
use thiserror::Error;

/// Where orders and prescriptions are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set when storage is postgres")]
    MissingDatabaseUrl,
}

/// Pharmacy Orders HTTP Server
#[derive(Parser, Debug, Clone)]
#[command(name = "pharmacy-server")]
#[command(about = "Pharmacy orders, prescriptions and sales reports HTTP API server")]
#[command(version)]
pub struct Args {
    /// Server bind address
    #[arg(long, env = "PHARMACY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "PHARMACY_PORT", default_value_t = 8080)]
    pub port: u16,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Storage backend
    #[arg(long, env = "PHARMACY_STORAGE", value_enum, default_value_t = StorageBackend::Postgres)]
    pub storage: StorageBackend,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 20)]
    pub max_connections: u32,

    /// Log output format
    #[arg(long, env = "PHARMACY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Allowed CORS origins, comma separated; any origin when empty
    #[arg(long, env = "PHARMACY_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

impl Args {
    /// Connection string for the postgres backend
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when no URL was configured.
    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            cors_origins: self
                .cors_origins
                .iter()
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            ..ServerConfig::default()
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name
    pub name: String,
    /// Origins allowed by the CORS layer
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "Pharmacy Orders API".to_string(),
            cors_origins: Vec::new(),
        }
    }
}
