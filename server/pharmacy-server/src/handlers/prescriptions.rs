use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use database_layer::{NewPrescription, Prescription, PrescriptionChanges, PrescriptionStatus};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::handlers::common::{parse_record_id, CountResponse, MessageResponse};
use crate::server::PharmacyServer;

pub const PRESCRIPTION_NOT_FOUND: &str = "Prescription not found";
pub const PRESCRIPTION_DELETED: &str = "Prescription deleted successfully";

/// Change Prescription Status Request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ChangeStatusRequest {
    pub status: PrescriptionStatus,
}

/// Upload a prescription to a pharmacy
#[utoipa::path(
    post,
    path = "/prescriptions/addprescription",
    request_body = NewPrescription,
    responses(
        (status = 201, description = "Prescription created successfully", body = Prescription),
        (status = 400, description = "Invalid request body", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    tag = "prescriptions"
)]
pub async fn add_prescription(
    State(server): State<PharmacyServer>,
    ApiJson(req): ApiJson<NewPrescription>,
) -> Result<(StatusCode, Json<Prescription>), ApiError> {
    let prescription = server
        .prescriptions
        .insert(req.into_prescription())
        .await?;

    info!(
        prescription_id = %prescription.id,
        pharmacy_id = %prescription.pharmacy_id,
        "Prescription created"
    );
    Ok((StatusCode::CREATED, Json(prescription)))
}

#[utoipa::path(
    delete,
    path = "/prescriptions/deleteprescription/{id}",
    responses(
        (status = 200, description = "Prescription deleted successfully", body = MessageResponse),
        (status = 404, description = "Prescription not found", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Prescription ID")
    ),
    tag = "prescriptions"
)]
pub async fn delete_prescription(
    State(server): State<PharmacyServer>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_record_id(&id)?;
    server
        .prescriptions
        .delete(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(PRESCRIPTION_NOT_FOUND))?;

    info!(prescription_id = %id, "Prescription deleted");
    Ok(Json(MessageResponse::new(PRESCRIPTION_DELETED)))
}

#[utoipa::path(
    put,
    path = "/prescriptions/updprescription/{id}",
    request_body = PrescriptionChanges,
    responses(
        (status = 200, description = "Prescription updated successfully", body = Prescription),
        (status = 404, description = "Prescription not found", body = crate::error::ApiErrorResponse),
        (status = 400, description = "Invalid request body", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Prescription ID")
    ),
    tag = "prescriptions"
)]
pub async fn update_prescription(
    State(server): State<PharmacyServer>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<PrescriptionChanges>,
) -> Result<Json<Prescription>, ApiError> {
    let id = parse_record_id(&id)?;
    let prescription = server
        .prescriptions
        .update(&id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(PRESCRIPTION_NOT_FOUND))?;

    Ok(Json(prescription))
}

#[utoipa::path(
    get,
    path = "/prescriptions/getprescriptioncount/{pharmacyId}",
    responses(
        (status = 200, description = "Prescription count retrieved successfully", body = CountResponse),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    params(
        ("pharmacyId" = String, Path, description = "Pharmacy ID")
    ),
    tag = "prescriptions"
)]
pub async fn get_prescription_count(
    State(server): State<PharmacyServer>,
    Path(pharmacy_id): Path<String>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = server.prescriptions.count_by_pharmacy(&pharmacy_id).await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/prescriptions/",
    responses(
        (status = 200, description = "Prescriptions retrieved successfully", body = Vec<Prescription>),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    tag = "prescriptions"
)]
pub async fn get_all_prescriptions(
    State(server): State<PharmacyServer>,
) -> Result<Json<Vec<Prescription>>, ApiError> {
    let prescriptions = server.prescriptions.list_all().await?;
    Ok(Json(prescriptions))
}

#[utoipa::path(
    get,
    path = "/prescriptions/{id}",
    responses(
        (status = 200, description = "Prescription retrieved successfully", body = Prescription),
        (status = 404, description = "Prescription not found", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Prescription ID")
    ),
    tag = "prescriptions"
)]
pub async fn get_prescription_by_id(
    State(server): State<PharmacyServer>,
    Path(id): Path<String>,
) -> Result<Json<Prescription>, ApiError> {
    let id = parse_record_id(&id)?;
    let prescription = server
        .prescriptions
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(PRESCRIPTION_NOT_FOUND))?;

    Ok(Json(prescription))
}

#[utoipa::path(
    get,
    path = "/prescriptions/pharmacy/{pharmacyId}",
    responses(
        (status = 200, description = "Prescriptions retrieved successfully", body = Vec<Prescription>),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    params(
        ("pharmacyId" = String, Path, description = "Pharmacy ID")
    ),
    tag = "prescriptions"
)]
pub async fn get_prescriptions_by_pharmacy(
    State(server): State<PharmacyServer>,
    Path(pharmacy_id): Path<String>,
) -> Result<Json<Vec<Prescription>>, ApiError> {
    let prescriptions = server.prescriptions.find_by_pharmacy(&pharmacy_id).await?;
    Ok(Json(prescriptions))
}

/// Move a prescription through its review states
#[utoipa::path(
    put,
    path = "/prescriptions/prescription/{id}",
    request_body = ChangeStatusRequest,
    responses(
        (status = 200, description = "Prescription status changed", body = Prescription),
        (status = 404, description = "Prescription not found", body = crate::error::ApiErrorResponse),
        (status = 400, description = "Invalid request body", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ApiErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "Prescription ID")
    ),
    tag = "prescriptions"
)]
pub async fn change_status(
    State(server): State<PharmacyServer>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ChangeStatusRequest>,
) -> Result<Json<Prescription>, ApiError> {
    let id = parse_record_id(&id)?;
    let prescription = server
        .prescriptions
        .set_status(&id, req.status)
        .await?
        .ok_or_else(|| ApiError::not_found(PRESCRIPTION_NOT_FOUND))?;

    info!(prescription_id = %prescription.id, status = %prescription.status, "Prescription status changed");
    Ok(Json(prescription))
}
