//! Vehicle transfer HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::application::TransferService;
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult, ValidatedJson};

use super::dto::*;

/// Application state for transfer handlers.
#[derive(Clone)]
pub struct TransferAppState {
    pub transfers: Arc<TransferService>,
}

#[utoipa::path(
    post,
    path = "/api/vehicle-transfers",
    tag = "Vehicle Transfers",
    request_body = CreateTransferRequest,
    responses(
        (status = 200, description = "Transfer requested", body = ApiResponse<TransferDto>),
        (status = 400, description = "Sender does not own the vehicle or sender equals recipient"),
        (status = 404, description = "Vehicle or customer not found"),
        (status = 409, description = "A transfer for the vehicle is already pending")
    )
)]
pub async fn create_transfer(
    State(state): State<TransferAppState>,
    ValidatedJson(request): ValidatedJson<CreateTransferRequest>,
) -> ApiResult<TransferDto> {
    let transfer = state
        .transfers
        .create(
            request.vehicle_id,
            request.from_customer_id,
            request.to_customer_id,
        )
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(transfer.into())))
}

#[utoipa::path(
    get,
    path = "/api/vehicle-transfers/{id}",
    tag = "Vehicle Transfers",
    params(("id" = i32, Path, description = "Transfer ID")),
    responses(
        (status = 200, description = "Transfer details", body = ApiResponse<TransferDto>),
        (status = 404, description = "Transfer not found")
    )
)]
pub async fn get_transfer(
    State(state): State<TransferAppState>,
    Path(id): Path<i32>,
) -> ApiResult<TransferDto> {
    let transfer = state.transfers.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(transfer.into())))
}

#[utoipa::path(
    post,
    path = "/api/vehicle-transfers/{id}/accept",
    tag = "Vehicle Transfers",
    params(("id" = i32, Path, description = "Transfer ID")),
    request_body = TransferDecisionRequest,
    responses(
        (status = 200, description = "Transfer accepted; vehicle reassigned", body = ApiResponse<TransferDto>),
        (status = 400, description = "Not the recipient, not pending, or expired"),
        (status = 404, description = "Transfer not found")
    )
)]
pub async fn accept_transfer(
    State(state): State<TransferAppState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<TransferDecisionRequest>,
) -> ApiResult<TransferDto> {
    let transfer = state
        .transfers
        .accept(id, request.customer_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(transfer.into())))
}

#[utoipa::path(
    post,
    path = "/api/vehicle-transfers/{id}/reject",
    tag = "Vehicle Transfers",
    params(("id" = i32, Path, description = "Transfer ID")),
    request_body = TransferDecisionRequest,
    responses(
        (status = 200, description = "Transfer rejected", body = ApiResponse<TransferDto>),
        (status = 400, description = "Not the recipient or not pending"),
        (status = 404, description = "Transfer not found")
    )
)]
pub async fn reject_transfer(
    State(state): State<TransferAppState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<TransferDecisionRequest>,
) -> ApiResult<TransferDto> {
    let transfer = state
        .transfers
        .reject(id, request.customer_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(transfer.into())))
}
