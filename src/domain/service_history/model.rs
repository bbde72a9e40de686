//! Service history entry

use chrono::{DateTime, NaiveDate, Utc};

/// Written once per service line when an appointment completes
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceHistoryEntry {
    pub id: i32,
    pub vehicle_id: i32,
    pub service_id: i32,
    pub service_center_id: i32,
    pub appointment_id: i32,
    pub service_date: NaiveDate,
    pub cost: i64,
    pub created_at: DateTime<Utc>,
}
