use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use database_layer::{DailySales, NewOrder, Order, OrderChanges};
use tracing::info;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::handlers::common::{parse_record_id, CountResponse, MessageResponse, TotalSalesResponse};
use crate::server::PharmacyServer;

pub const ORDER_NOT_FOUND: &str = "Order not found";
pub const ORDER_DELETED: &str = "Order deleted successfully";
pub const NO_DISPATCHED_SALES: &str = "No sales data found for orders with status \"Dispatched\".";
pub const NO_DISPATCHED_SALES_FOR_PHARMACY: &str =
    "No sales data found for orders with status \"Dispatched\" for this pharmacy.";

/// Place a new order
#[utoipa::path(
    post,
    path = "/orders/addorder",
    request_body = NewOrder,
    responses(
        (status = 201, description = "Order created successfully", body = Order),
        (status = 400, description = "Invalid request body", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    tag = "orders"
)]
pub async fn add_order(
    State(server): State<PharmacyServer>,
    ApiJson(req): ApiJson<NewOrder>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = server.orders.insert(req.into_order()).await?;

    info!(order_id = %order.id, user_id = %order.user_id, "Order created");
    Ok((StatusCode::CREATED, Json(order)))
}

/// List orders containing a product of the pharmacy
#[utoipa::path(
    get,
    path = "/orders/pharmacy/{pharmacyId}",
    responses(
        (status = 200, description = "Orders retrieved successfully", body = Vec<Order>),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    params(
        ("pharmacyId" = String, Path, description = "Pharmacy ID")
    ),
    tag = "orders"
)]
pub async fn get_orders_by_pharmacy(
    State(server): State<PharmacyServer>,
    Path(pharmacy_id): Path<String>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = server.orders.find_by_pharmacy(&pharmacy_id).await?;
    Ok(Json(orders))
}

/// Update an order
#[utoipa::path(
    put,
    path = "/orders/{id}",
    request_body = OrderChanges,
    responses(
        (status = 200, description = "Order updated successfully", body = Order),
        (status = 404, description = "Order not found", body = crate::error::ApiErrorResponse),
        (status = 400, description = "Invalid request body", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    tag = "orders"
)]
pub async fn update_order(
    State(server): State<PharmacyServer>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<OrderChanges>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_record_id(&id)?;
    let order = server
        .orders
        .update(&id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(ORDER_NOT_FOUND))?;

    info!(order_id = %order.id, status = %order.order_status, "Order updated");
    Ok(Json(order))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    responses(
        (status = 200, description = "Order deleted successfully", body = MessageResponse),
        (status = 404, description = "Order not found", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    tag = "orders"
)]
pub async fn delete_order(
    State(server): State<PharmacyServer>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_record_id(&id)?;
    server
        .orders
        .delete(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(ORDER_NOT_FOUND))?;

    info!(order_id = %id, "Order deleted");
    Ok(Json(MessageResponse::new(ORDER_DELETED)))
}

/// Count orders containing a product of the pharmacy
#[utoipa::path(
    get,
    path = "/orders/count/{pharmacyId}",
    responses(
        (status = 200, description = "Order count retrieved successfully", body = CountResponse),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    params(
        ("pharmacyId" = String, Path, description = "Pharmacy ID")
    ),
    tag = "orders"
)]
pub async fn get_order_count_by_pharmacy(
    State(server): State<PharmacyServer>,
    Path(pharmacy_id): Path<String>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = server.orders.count_by_pharmacy(&pharmacy_id).await?;
    Ok(Json(CountResponse { count }))
}

/// List orders placed by a user
#[utoipa::path(
    get,
    path = "/orders/user/{userId}",
    responses(
        (status = 200, description = "Orders retrieved successfully", body = Vec<Order>),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    params(
        ("userId" = String, Path, description = "User ID")
    ),
    tag = "orders"
)]
pub async fn get_orders_by_user(
    State(server): State<PharmacyServer>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = server.orders.find_by_user(&user_id).await?;
    Ok(Json(orders))
}

/// Total revenue of dispatched orders
#[utoipa::path(
    get,
    path = "/orders/sales/dispatched",
    responses(
        (status = 200, description = "Total dispatched sales", body = TotalSalesResponse),
        (status = 404, description = "No dispatched orders", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    tag = "sales"
)]
pub async fn get_total_dispatched_sales(
    State(server): State<PharmacyServer>,
) -> Result<Json<TotalSalesResponse>, ApiError> {
    let total_sales = server
        .orders
        .total_dispatched_sales()
        .await
        .map_err(ApiError::sales_report)?
        .ok_or_else(|| ApiError::not_found(NO_DISPATCHED_SALES))?;

    Ok(Json(TotalSalesResponse { total_sales }))
}

/// Dispatched revenue of a pharmacy per calendar day
#[utoipa::path(
    get,
    path = "/orders/sales/dispatched/{pharmacyId}",
    responses(
        (status = 200, description = "Daily dispatched sales, oldest day first", body = Vec<DailySales>),
        (status = 404, description = "No dispatched orders for the pharmacy", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    params(
        ("pharmacyId" = String, Path, description = "Pharmacy ID")
    ),
    tag = "sales"
)]
pub async fn get_dispatched_sales_by_day(
    State(server): State<PharmacyServer>,
    Path(pharmacy_id): Path<String>,
) -> Result<Json<Vec<DailySales>>, ApiError> {
    let report = server
        .orders
        .dispatched_sales_by_day(&pharmacy_id)
        .await
        .map_err(ApiError::sales_report)?;

    if report.is_empty() {
        return Err(ApiError::not_found(NO_DISPATCHED_SALES_FOR_PHARMACY));
    }

    Ok(Json(report))
}
