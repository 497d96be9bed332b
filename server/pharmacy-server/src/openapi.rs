use axum::Json;
use utoipa::OpenApi;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::handlers::health::health_check,
        crate::handlers::health::version_info,

        // Order endpoints
        crate::handlers::orders::add_order,
        crate::handlers::orders::get_orders_by_pharmacy,
        crate::handlers::orders::update_order,
        crate::handlers::orders::delete_order,
        crate::handlers::orders::get_order_count_by_pharmacy,
        crate::handlers::orders::get_orders_by_user,
        crate::handlers::orders::get_total_dispatched_sales,
        crate::handlers::orders::get_dispatched_sales_by_day,

        // Prescription endpoints
        crate::handlers::prescriptions::add_prescription,
        crate::handlers::prescriptions::delete_prescription,
        crate::handlers::prescriptions::update_prescription,
        crate::handlers::prescriptions::get_prescription_count,
        crate::handlers::prescriptions::get_all_prescriptions,
        crate::handlers::prescriptions::get_prescription_by_id,
        crate::handlers::prescriptions::get_prescriptions_by_pharmacy,
        crate::handlers::prescriptions::change_status,
    ),
    components(
        schemas(
            // Health schemas
            crate::handlers::health::HealthResponse,
            crate::handlers::health::VersionResponse,

            // Shared schemas
            crate::error::ApiErrorResponse,
            crate::handlers::common::MessageResponse,
            crate::handlers::common::CountResponse,
            crate::handlers::common::TotalSalesResponse,

            // Order schemas
            database_layer::Order,
            database_layer::NewOrder,
            database_layer::OrderChanges,
            database_layer::OrderStatus,
            database_layer::DailySales,
            database_layer::SalesDay,

            // Prescription schemas
            database_layer::Prescription,
            database_layer::NewPrescription,
            database_layer::PrescriptionChanges,
            database_layer::PrescriptionStatus,
            crate::handlers::prescriptions::ChangeStatusRequest,
        )
    ),
    tags(
        (name = "health", description = "System health and status endpoints"),
        (name = "orders", description = "Order placement and management"),
        (name = "sales", description = "Revenue reports over dispatched orders"),
        (name = "prescriptions", description = "Prescription uploads and review"),
    ),
    info(
        title = "Pharmacy Orders API",
        version = "1.0.0",
        description = "Orders, prescriptions and dispatched-sales reporting for partner pharmacies.",
    ),
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
