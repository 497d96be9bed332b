//! Pharmacy Orders Server - orders, prescriptions and sales reports API
//!
//! This library provides the HTTP surface of the pharmacy orders service:
//! routing, handlers, error mapping and middleware. Persistence lives in the
//! `database-layer` crate behind the [`database_layer::OrderStore`] and
//! [`database_layer::PrescriptionStore`] traits.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;

// Re-export commonly used types
pub use config::{Args, ServerConfig};
pub use error::*;
pub use server::PharmacyServer;

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: PharmacyServer) -> Router {
    let cors = middleware::create_cors_layer(&server.config.cors_origins);

    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(from_fn(middleware::request_timing_middleware)),
        )
        .with_state(server)
}
