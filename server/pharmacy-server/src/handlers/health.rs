use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::server::PharmacyServer;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall system health status
    #[schema(example = "healthy")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: String,
    /// API version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// System uptime in seconds
    #[schema(example = 3600)]
    pub uptime: u64,
    /// Individual store health checks
    pub checks: BTreeMap<String, String>,
}

/// Version information response
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionResponse {
    /// Application name
    #[schema(example = "Pharmacy Orders API")]
    pub name: String,
    /// Application version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Enabled features
    pub features: Vec<String>,
}

fn check_label(healthy: bool) -> String {
    let label = if healthy { "healthy" } else { "unhealthy" };
    label.to_string()
}

/// Health check handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse),
        (status = 503, description = "System is unhealthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(server): State<PharmacyServer>) -> (StatusCode, Json<HealthResponse>) {
    let orders_ok = server.orders.is_healthy().await;
    let prescriptions_ok = server.prescriptions.is_healthy().await;

    let mut checks = BTreeMap::new();
    checks.insert("orders_store".to_string(), check_label(orders_ok));
    checks.insert("prescriptions_store".to_string(), check_label(prescriptions_ok));

    let healthy = orders_ok && prescriptions_ok;
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: check_label(healthy),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: server.uptime_seconds(),
        checks,
    };

    (status_code, Json(response))
}

/// Version information handler
#[utoipa::path(
    get,
    path = "/version",
    tag = "health",
    responses(
        (status = 200, description = "Version information retrieved successfully", body = VersionResponse)
    )
)]
pub async fn version_info(State(server): State<PharmacyServer>) -> Json<VersionResponse> {
    let features = vec![
        "orders".to_string(),
        "prescriptions".to_string(),
        "sales-reports".to_string(),
        "openapi".to_string(),
    ];

    Json(VersionResponse {
        name: server.config.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features,
    })
}
