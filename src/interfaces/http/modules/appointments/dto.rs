//! Appointment DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{BookingRequest, Quote};
use crate::domain::{Appointment, AppointmentLine};

/// Booking (and quote) request. Field names are camelCase on the wire;
/// the snake_case spellings are accepted as aliases.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "customer_id")]
    pub customer_id: i32,
    #[validate(range(min = 1))]
    #[serde(alias = "vehicle_id")]
    pub vehicle_id: i32,
    #[validate(range(min = 1))]
    #[serde(alias = "service_center_id")]
    pub service_center_id: i32,
    /// Calendar date of the visit (YYYY-MM-DD)
    #[serde(rename = "date", alias = "appointment_date")]
    pub appointment_date: NaiveDate,
    /// Requested services; duplicates are ignored
    #[serde(alias = "service_ids")]
    pub service_ids: Vec<i32>,
}

impl From<BookAppointmentRequest> for BookingRequest {
    fn from(r: BookAppointmentRequest) -> Self {
        BookingRequest {
            customer_id: r.customer_id,
            vehicle_id: r.vehicle_id,
            service_center_id: r.service_center_id,
            date: r.appointment_date,
            service_ids: r.service_ids,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentLineDto {
    pub service_id: i32,
    pub service_name: String,
    /// Price charged at booking time, in minor currency units
    pub price: i64,
}

impl From<AppointmentLine> for AppointmentLineDto {
    fn from(l: AppointmentLine) -> Self {
        Self {
            service_id: l.service_id,
            service_name: l.service_name,
            price: l.price,
        }
    }
}

/// Appointment with its service lines
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentDto {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub service_center_id: i32,
    pub appointment_date: NaiveDate,
    /// Pending, Confirmed, Completed or Cancelled
    pub status: String,
    pub estimated_total_cost: i64,
    pub actual_total_cost: Option<i64>,
    pub discount_amount: i64,
    pub package_id: Option<i32>,
    pub loyalty_points: i32,
    pub is_advance_payment_completed: bool,
    pub is_fully_paid: bool,
    pub services: Vec<AppointmentLineDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentDto {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            customer_id: a.customer_id,
            vehicle_id: a.vehicle_id,
            service_center_id: a.service_center_id,
            appointment_date: a.appointment_date,
            status: a.status.as_str().to_string(),
            estimated_total_cost: a.estimated_total_cost,
            actual_total_cost: a.actual_total_cost,
            discount_amount: a.discount_amount,
            package_id: a.package_id,
            loyalty_points: a.loyalty_points,
            is_advance_payment_completed: a.is_advance_payment_completed,
            is_fully_paid: a.is_fully_paid,
            services: a.lines.into_iter().map(Into::into).collect(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// Price preview for a prospective booking
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteDto {
    pub services: Vec<AppointmentLineDto>,
    pub subtotal: i64,
    pub discount: i64,
    pub total: i64,
    pub package_id: Option<i32>,
    pub package_name: Option<String>,
    pub loyalty_points: i32,
}

impl From<Quote> for QuoteDto {
    fn from(q: Quote) -> Self {
        Self {
            services: q.lines.into_iter().map(Into::into).collect(),
            subtotal: q.subtotal,
            discount: q.discount,
            total: q.total,
            package_id: q.package_id,
            package_name: q.package_name,
            loyalty_points: q.loyalty_points,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CompleteAppointmentRequest {
    /// Final cost; defaults to the estimate
    #[validate(range(min = 0))]
    pub actual_total_cost: Option<i64>,
}
