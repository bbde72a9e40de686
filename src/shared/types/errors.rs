use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Booking rejected: {0}")]
    BookingRejected(String),

    #[error("Service center {service_center_id} has no capacity left on {date} (max {max})")]
    CapacityExceeded {
        service_center_id: i32,
        date: NaiveDate,
        max: i32,
    },

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }

    /// Stable machine-readable code surfaced to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Validation(_) => "VALIDATION_ERROR",
            DomainError::BookingRejected(_) => "BOOKING_REJECTED",
            DomainError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            DomainError::Conflict(_) => "CONFLICT",
            DomainError::PaymentDeclined(_) => "PAYMENT_DECLINED",
            DomainError::Storage(_) => "STORAGE_UNAVAILABLE",
            DomainError::InvariantViolation(_) => "INVARIANT_VIOLATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_storage_errors_are_transient() {
        assert!(DomainError::Storage("connection reset".into()).is_transient());
        assert!(!DomainError::Validation("amount".into()).is_transient());
        assert!(!DomainError::InvariantViolation("dup".into()).is_transient());
    }

    #[test]
    fn capacity_error_message_names_center_and_date() {
        let err = DomainError::CapacityExceeded {
            service_center_id: 7,
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            max: 1,
        };
        assert_eq!(err.code(), "CAPACITY_EXCEEDED");
        assert_eq!(
            err.to_string(),
            "Service center 7 has no capacity left on 2026-03-02 (max 1)"
        );
    }
}
