//! Payment HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::application::PaymentService;
use crate::interfaces::http::common::{
    bad_request, domain_error, ApiResponse, ApiResult, ValidatedJson,
};

use super::dto::*;

/// Application state for payment handlers.
#[derive(Clone)]
pub struct PaymentAppState {
    pub payments: Arc<PaymentService>,
}

#[utoipa::path(
    post,
    path = "/api/appointments/{id}/payments",
    tag = "Payments",
    params(("id" = i32, Path, description = "Appointment ID")),
    request_body = RecordPaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = ApiResponse<PaymentLogDto>),
        (status = 400, description = "Invalid amount, type or appointment state"),
        (status = 402, description = "Payment declined by the gateway"),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn record_payment(
    State(state): State<PaymentAppState>,
    Path(appointment_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<RecordPaymentRequest>,
) -> ApiResult<PaymentLogDto> {
    let payment = request.into_payment(appointment_id).map_err(bad_request)?;

    let log = state
        .payments
        .record_payment(payment)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(log.into())))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}/payments",
    tag = "Payments",
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Payment attempts, oldest first", body = ApiResponse<Vec<PaymentLogDto>>),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn payment_history(
    State(state): State<PaymentAppState>,
    Path(appointment_id): Path<i32>,
) -> ApiResult<Vec<PaymentLogDto>> {
    let logs = state
        .payments
        .payment_history(appointment_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        logs.into_iter().map(PaymentLogDto::from).collect(),
    )))
}
