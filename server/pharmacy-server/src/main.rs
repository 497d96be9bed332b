use anyhow::{Context, Result};
use clap::Parser;
use database_layer::DatabasePool;
use tokio::net::TcpListener;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt::time::ChronoUtc, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pharmacy_server::{
    config::{LogFormat, StorageBackend},
    create_app, Args, PharmacyServer,
};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    init_tracing(args.log_format, args.verbose);

    info!("Starting Pharmacy Orders HTTP Server");
    info!(version = env!("CARGO_PKG_VERSION"), "Version");

    let config = args.server_config();
    let server = match args.storage {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; records are lost on restart");
            PharmacyServer::in_memory(config)
        }
        StorageBackend::Postgres => {
            let pool = DatabasePool::new(args.database_url()?, &args.pool_settings())
                .await
                .context("Failed to connect to the database")?;
            pool.ensure_schema()
                .await
                .context("Failed to prepare the database schema")?;
            PharmacyServer::with_database(config, pool)
        }
    };

    let app = create_app(server.clone());

    let listener = TcpListener::bind((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", args.host, args.port))?;

    info!("Pharmacy Orders server running on http://{}:{}", args.host, args.port);
    info!("Health check available at: http://{}:{}/health", args.host, args.port);
    info!("OpenAPI document at: http://{}:{}/api-docs/openapi.json", args.host, args.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    server.shutdown().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn init_tracing(format: LogFormat, verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("pharmacy_server={level},database_layer={level},tower_http=info,sqlx=warn").into()
    });

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339()),
                )
                .init();
        }
        LogFormat::Json => {
            // Structured JSON logging for production
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(false)
                        .json(),
                )
                .init();
        }
    }
}
