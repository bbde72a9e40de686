//! Service history repository interface

use async_trait::async_trait;

use super::model::ServiceHistoryEntry;
use crate::domain::DomainResult;

#[async_trait]
pub trait ServiceHistoryRepository: Send + Sync {
    async fn find_for_vehicle(&self, vehicle_id: i32) -> DomainResult<Vec<ServiceHistoryEntry>>;
}
