//! Request extractors

use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON request body whose rejections are answered with [`ApiError`]
///
/// Deserializer messages name internal fields, so they go to the log only.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
