//! Appointment HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::{BookingRequest, BookingService, PaymentService};
use crate::domain::appointment::CancelOutcome;
use crate::interfaces::http::common::{
    booking_error, domain_error, ApiError, ApiResponse, ApiResult, PaginatedResponse, PaginationQuery,
    ValidatedJson,
};

use super::dto::*;

/// Application state for appointment handlers.
#[derive(Clone)]
pub struct AppointmentAppState {
    pub booking: Arc<BookingService>,
    pub payments: Arc<PaymentService>,
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Appointments",
    request_body = BookAppointmentRequest,
    responses(
        (status = 200, description = "Appointment booked", body = ApiResponse<AppointmentDto>),
        (status = 400, description = "Malformed JSON"),
        (status = 404, description = "Customer, vehicle or service center not found"),
        (status = 409, description = "Booking rejected, invalid selection or no capacity left"),
        (status = 422, description = "Field rule violated")
    )
)]
pub async fn book_appointment(
    State(state): State<AppointmentAppState>,
    ValidatedJson(request): ValidatedJson<BookAppointmentRequest>,
) -> ApiResult<AppointmentDto> {
    let appointment = state
        .booking
        .book(BookingRequest::from(request))
        .await
        .map_err(booking_error)?;

    Ok(Json(ApiResponse::success(appointment.into())))
}

#[utoipa::path(
    post,
    path = "/api/appointments/quote",
    tag = "Appointments",
    request_body = BookAppointmentRequest,
    responses(
        (status = 200, description = "Price preview", body = ApiResponse<QuoteDto>),
        (status = 404, description = "Service center not found"),
        (status = 409, description = "A service is not offered by the center")
    )
)]
pub async fn quote_appointment(
    State(state): State<AppointmentAppState>,
    ValidatedJson(request): ValidatedJson<BookAppointmentRequest>,
) -> ApiResult<QuoteDto> {
    let quote = state
        .booking
        .quote(&BookingRequest::from(request))
        .await
        .map_err(booking_error)?;

    Ok(Json(ApiResponse::success(quote.into())))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment details", body = ApiResponse<AppointmentDto>),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn get_appointment(
    State(state): State<AppointmentAppState>,
    Path(id): Path<i32>,
) -> ApiResult<AppointmentDto> {
    let appointment = state.booking.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(appointment.into())))
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 204, description = "Appointment cancelled (or already cancelled)"),
        (status = 400, description = "Appointment already completed"),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn cancel_appointment(
    State(state): State<AppointmentAppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError<()>> {
    match state.booking.cancel(id).await.map_err(domain_error)? {
        CancelOutcome::Cancelled(_) | CancelOutcome::AlreadyCancelled(_) => {
            Ok(StatusCode::NO_CONTENT)
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/appointments/{id}/confirm",
    tag = "Appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment confirmed", body = ApiResponse<AppointmentDto>),
        (status = 400, description = "Appointment is not pending"),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn confirm_appointment(
    State(state): State<AppointmentAppState>,
    Path(id): Path<i32>,
) -> ApiResult<AppointmentDto> {
    let appointment = state.booking.confirm(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(appointment.into())))
}

#[utoipa::path(
    post,
    path = "/api/appointments/{id}/complete",
    tag = "Appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    request_body = CompleteAppointmentRequest,
    responses(
        (status = 200, description = "Appointment completed", body = ApiResponse<AppointmentDto>),
        (status = 400, description = "Appointment is not confirmed"),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn complete_appointment(
    State(state): State<AppointmentAppState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<CompleteAppointmentRequest>,
) -> ApiResult<AppointmentDto> {
    let appointment = state
        .payments
        .complete_appointment(id, request.actual_total_cost)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(appointment.into())))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}/appointments",
    tag = "Appointments",
    params(
        ("id" = i32, Path, description = "Customer ID"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Customer appointments, newest date first", body = ApiResponse<PaginatedResponse<AppointmentDto>>),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn list_customer_appointments(
    State(state): State<AppointmentAppState>,
    Path(customer_id): Path<i32>,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<PaginatedResponse<AppointmentDto>> {
    let page = state
        .booking
        .list_for_customer(customer_id, pagination.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(page.into())))
}
