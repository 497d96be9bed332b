use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use database_layer::DatabaseError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Public message for persistence failures on record endpoints
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Public message for persistence failures on the sales report endpoints
pub const SALES_INTERNAL_ERROR: &str = "Internal server error.";

/// Public message for request bodies that are not valid JSON of the expected shape
pub const INVALID_REQUEST_BODY: &str = "Invalid request body";

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Human-readable error message
    #[schema(example = "Order not found")]
    pub message: String,
    /// Error type/code
    #[schema(example = "not_found")]
    pub error_type: String,
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Sales report failed: {0}")]
    SalesReport(#[source] DatabaseError),
}

impl ApiError {
    /// Create a not found error carrying the message shown to the caller
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Wrap a store failure raised while computing a sales report
    pub fn sales_report(err: DatabaseError) -> Self {
        Self::SalesReport(err)
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::SalesReport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "not_found",
            ApiError::InvalidBody(_) => "invalid_body",
            ApiError::Database(DatabaseError::InvalidRecordId(_)) => "invalid_identifier",
            ApiError::Database(_) | ApiError::SalesReport(_) => "database_error",
        }
    }

    /// Message exposed in the response body
    ///
    /// Store details stay in the server log, keyed by the error id.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::NotFound { message } => message.clone(),
            ApiError::InvalidBody(_) => INVALID_REQUEST_BODY.to_string(),
            ApiError::SalesReport(_) => SALES_INTERNAL_ERROR.to_string(),
            ApiError::Database(_) => INTERNAL_SERVER_ERROR.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        // Log the error with correlation ID
        error!(
            error_id = %error_id,
            error_type = %self.error_type(),
            status_code = %status_code.as_u16(),
            error = %self,
            "API error occurred"
        );

        let error_response = ApiErrorResponse {
            message: self.public_message(),
            error_type: self.error_type().to_string(),
            error_id,
            timestamp: chrono::Utc::now(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_its_message() {
        let err = ApiError::not_found("Order not found");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Order not found");
    }

    #[test]
    fn test_database_errors_are_generic_500s() {
        let err = ApiError::from(DatabaseError::ConnectionFailed("pool timed out".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("pool timed out"));
    }

    #[test]
    fn test_malformed_id_is_a_500() {
        let err = ApiError::from(DatabaseError::InvalidRecordId("abc".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_type(), "invalid_identifier");
        assert_eq!(err.public_message(), INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_sales_report_failures_use_report_message() {
        let err = ApiError::sales_report(DatabaseError::ConnectionFailed("refused".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), SALES_INTERNAL_ERROR);
    }
}
