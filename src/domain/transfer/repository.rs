//! Vehicle transfer repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{TransferStatus, VehicleTransfer};
use crate::domain::DomainResult;

#[async_trait]
pub trait TransferRepository: Send + Sync {
    async fn save(&self, transfer: VehicleTransfer) -> DomainResult<VehicleTransfer>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<VehicleTransfer>>;
    async fn find_pending_for_vehicle(&self, vehicle_id: i32)
        -> DomainResult<Option<VehicleTransfer>>;

    /// Mark Accepted and reassign the vehicle owner in one transaction.
    /// Fails with `Conflict` if the transfer is no longer Pending.
    async fn accept(&self, id: i32, resolved_at: DateTime<Utc>) -> DomainResult<VehicleTransfer>;

    /// Move a Pending transfer to a terminal status; false if it was not Pending
    async fn resolve_if_pending(
        &self,
        id: i32,
        status: TransferStatus,
        resolved_at: DateTime<Utc>,
    ) -> DomainResult<bool>;

    /// Pending transfers with `expires_at <= now`
    async fn find_overdue(&self, now: DateTime<Utc>) -> DomainResult<Vec<VehicleTransfer>>;
}
