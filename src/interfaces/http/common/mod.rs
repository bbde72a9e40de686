//! Response envelope, pagination DTOs and error mapping shared by every handler

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;
use crate::shared::{PaginatedResult, PaginationParams};

/// Standard API response envelope.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "error": "...", "code": "NOT_FOUND"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Payload; `null` on failure
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            code: None,
        }
    }

    pub fn error_with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            code: Some(code.into()),
        }
    }
}

/// Error half of every handler result
pub type ApiError<T> = (StatusCode, Json<ApiResponse<T>>);

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError<T>>;

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::BookingRejected(_) => StatusCode::CONFLICT,
        DomainError::CapacityExceeded { .. } => StatusCode::CONFLICT,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::PaymentDeclined(_) => StatusCode::PAYMENT_REQUIRED,
        DomainError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::InvariantViolation(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a domain error into the HTTP error envelope
pub fn domain_error<T>(err: DomainError) -> ApiError<T> {
    let status = status_for(&err);
    if status.is_server_error() {
        error!(code = err.code(), "Request failed: {}", err);
    }
    (
        status,
        Json(ApiResponse::error_with_code(err.to_string(), err.code())),
    )
}

/// Booking and quote answer a rejected request with 409 whatever the cause;
/// only missing references keep their 404
pub fn booking_error<T>(err: DomainError) -> ApiError<T> {
    match err {
        DomainError::Validation(_) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::error_with_code(err.to_string(), err.code())),
        ),
        other => domain_error(other),
    }
}

/// 400 for input that never reached the domain layer
pub fn bad_request<T>(message: impl Into<String>) -> ApiError<T> {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error_with_code(message, "VALIDATION_ERROR")),
    )
}

/// Pagination query parameters
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct PaginationQuery {
    /// Page number, starting at 1. Default: 1
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (1-100). Default: 50
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    50
}

impl From<PaginationQuery> for PaginationParams {
    fn from(q: PaginationQuery) -> Self {
        PaginationParams::new(q.page, q.limit)
    }
}

/// One page of results plus page metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T, D> From<PaginatedResult<D>> for PaginatedResponse<T>
where
    T: From<D>,
{
    fn from(r: PaginatedResult<D>) -> Self {
        Self {
            items: r.items.into_iter().map(T::from).collect(),
            total: r.total,
            page: r.page,
            limit: r.limit,
            total_pages: r.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn domain_errors_map_to_documented_statuses() {
        let cases = [
            (DomainError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::BookingRejected("x".into()), StatusCode::CONFLICT),
            (
                DomainError::CapacityExceeded {
                    service_center_id: 1,
                    date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
                    max: 2,
                },
                StatusCode::CONFLICT,
            ),
            (DomainError::not_found("Appointment", "id", 9), StatusCode::NOT_FOUND),
            (DomainError::Conflict("x".into()), StatusCode::CONFLICT),
            (DomainError::PaymentDeclined("x".into()), StatusCode::PAYMENT_REQUIRED),
            (DomainError::Storage("x".into()), StatusCode::SERVICE_UNAVAILABLE),
            (
                DomainError::InvariantViolation("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(status_for(&err), status, "{:?}", err);
        }
    }

    #[test]
    fn error_envelope_carries_code() {
        let (status, Json(body)) = domain_error::<()>(DomainError::CapacityExceeded {
            service_center_id: 3,
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            max: 1,
        });
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(!body.success);
        assert_eq!(body.code.as_deref(), Some("CAPACITY_EXCEEDED"));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["data"], serde_json::Value::Null);
    }

    #[test]
    fn booking_validation_is_a_conflict() {
        let (status, Json(body)) =
            booking_error::<()>(DomainError::Validation("no services selected".into()));
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.code.as_deref(), Some("VALIDATION_ERROR"));

        let (status, _) = booking_error::<()>(DomainError::not_found("Vehicle", "id", 4));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn success_envelope_omits_error_fields() {
        let json = serde_json::to_value(ApiResponse::success(5)).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": 5}));
    }
}
