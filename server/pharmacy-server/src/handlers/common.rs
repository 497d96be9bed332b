//! Response bodies shared by the order and prescription handlers

use database_layer::RecordId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

/// Plain acknowledgement, e.g. after a delete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Order deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    #[schema(example = 12)]
    pub count: i64,
}

/// Revenue across all dispatched orders
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalSalesResponse {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 15230.75)]
    pub total_sales: Decimal,
}

/// Parse a record id taken from the request path
///
/// A malformed id is reported like any other persistence failure.
pub(crate) fn parse_record_id(raw: &str) -> Result<RecordId, ApiError> {
    Ok(RecordId::parse(raw)?)
}
