//! Vehicle transfer DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::VehicleTransfer;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTransferRequest {
    #[validate(range(min = 1))]
    pub vehicle_id: i32,
    /// Current owner
    #[validate(range(min = 1))]
    pub from_customer_id: i32,
    #[validate(range(min = 1))]
    pub to_customer_id: i32,
}

/// Body of accept / reject: the acting customer
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TransferDecisionRequest {
    #[validate(range(min = 1))]
    pub customer_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransferDto {
    pub id: i32,
    pub vehicle_id: i32,
    pub from_customer_id: i32,
    pub to_customer_id: i32,
    /// Pending, Accepted, Rejected or Expired
    pub status: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<VehicleTransfer> for TransferDto {
    fn from(t: VehicleTransfer) -> Self {
        Self {
            id: t.id,
            vehicle_id: t.vehicle_id,
            from_customer_id: t.from_customer_id,
            to_customer_id: t.to_customer_id,
            status: t.status.as_str().to_string(),
            expires_at: t.expires_at,
            created_at: t.created_at,
            resolved_at: t.resolved_at,
        }
    }
}
