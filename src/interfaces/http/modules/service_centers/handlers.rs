//! Service center capacity handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;

use crate::application::SlotAllocator;
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult, ValidatedJson};

use super::dto::*;

/// Application state for service center handlers.
#[derive(Clone)]
pub struct ServiceCenterAppState {
    pub slots: Arc<SlotAllocator>,
}

#[utoipa::path(
    get,
    path = "/api/service-centers/{id}/availability",
    tag = "Service Centers",
    params(
        ("id" = i32, Path, description = "Service center ID"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Capacity for the date", body = ApiResponse<AvailabilityDto>),
        (status = 404, description = "Service center not found")
    )
)]
pub async fn get_availability(
    State(state): State<ServiceCenterAppState>,
    Path(service_center_id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<AvailabilityDto> {
    let usage = state
        .slots
        .availability(service_center_id, query.date)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(usage.into())))
}

#[utoipa::path(
    put,
    path = "/api/service-centers/{id}/daily-limits/{date}",
    tag = "Service Centers",
    params(
        ("id" = i32, Path, description = "Service center ID"),
        ("date" = String, Path, description = "Calendar date (YYYY-MM-DD)")
    ),
    request_body = SetDailyLimitRequest,
    responses(
        (status = 200, description = "Limit updated", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "Limit negative or below current bookings"),
        (status = 404, description = "Service center not found")
    )
)]
pub async fn set_daily_limit(
    State(state): State<ServiceCenterAppState>,
    Path((service_center_id, date)): Path<(i32, NaiveDate)>,
    ValidatedJson(request): ValidatedJson<SetDailyLimitRequest>,
) -> ApiResult<AvailabilityDto> {
    let usage = state
        .slots
        .set_daily_limit(service_center_id, date, request.max_appointments)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(usage.into())))
}
