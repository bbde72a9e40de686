//! Service center capacity DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::DailyUsage;

#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// Calendar date (YYYY-MM-DD)
    pub date: NaiveDate,
}

/// Capacity of one center on one date
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityDto {
    pub service_center_id: i32,
    pub date: NaiveDate,
    pub max_appointments: i32,
    pub used: i32,
    pub remaining: i32,
}

impl From<DailyUsage> for AvailabilityDto {
    fn from(u: DailyUsage) -> Self {
        Self {
            remaining: u.remaining(),
            service_center_id: u.service_center_id,
            date: u.date,
            max_appointments: u.max_appointments,
            used: u.used,
        }
    }
}

/// Override the capacity of a single date.
///
/// Must not be negative or below the bookings already taken.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetDailyLimitRequest {
    pub max_appointments: i32,
}
