pub mod paths;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{
    handlers::{health, orders, prescriptions},
    openapi,
    server::PharmacyServer,
};

/// Create health check and documentation routes
pub fn health_routes() -> Router<PharmacyServer> {
    Router::new()
        .route(paths::health::HEALTH, get(health::health_check))
        .route(paths::health::VERSION, get(health::version_info))
        .route(paths::health::OPENAPI_JSON, get(openapi::openapi_json))
}

/// Create order routes
pub fn order_routes() -> Router<PharmacyServer> {
    Router::new()
        .route(paths::orders::ADD, post(orders::add_order))
        .route(paths::orders::BY_PHARMACY, get(orders::get_orders_by_pharmacy))
        .route(
            paths::orders::BY_ID,
            put(orders::update_order).delete(orders::delete_order),
        )
        .route(paths::orders::COUNT_BY_PHARMACY, get(orders::get_order_count_by_pharmacy))
        .route(paths::orders::BY_USER, get(orders::get_orders_by_user))
        .route(paths::orders::SALES_DISPATCHED, get(orders::get_total_dispatched_sales))
        .route(
            paths::orders::SALES_DISPATCHED_BY_PHARMACY,
            get(orders::get_dispatched_sales_by_day),
        )
}

/// Create prescription routes
pub fn prescription_routes() -> Router<PharmacyServer> {
    Router::new()
        .route(paths::prescriptions::ADD, post(prescriptions::add_prescription))
        .route(paths::prescriptions::DELETE, delete(prescriptions::delete_prescription))
        .route(paths::prescriptions::UPDATE, put(prescriptions::update_prescription))
        .route(
            paths::prescriptions::COUNT_BY_PHARMACY,
            get(prescriptions::get_prescription_count),
        )
        .route(paths::prescriptions::ALL, get(prescriptions::get_all_prescriptions))
        .route(paths::prescriptions::ALL_NO_SLASH, get(prescriptions::get_all_prescriptions))
        .route(paths::prescriptions::BY_ID, get(prescriptions::get_prescription_by_id))
        .route(
            paths::prescriptions::BY_PHARMACY,
            get(prescriptions::get_prescriptions_by_pharmacy),
        )
        .route(paths::prescriptions::CHANGE_STATUS, put(prescriptions::change_status))
}

/// Create all application routes
pub fn create_routes() -> Router<PharmacyServer> {
    Router::new()
        .merge(health_routes())
        .merge(order_routes())
        .merge(prescription_routes())
}
