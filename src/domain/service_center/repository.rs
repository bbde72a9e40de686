//! Service center repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{CenterClosure, CenterOffering, ServiceCenter};
use crate::domain::DomainResult;

#[async_trait]
pub trait ServiceCenterRepository: Send + Sync {
    async fn save(&self, center: ServiceCenter) -> DomainResult<ServiceCenter>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ServiceCenter>>;

    /// Insert an offering; a second offering for the same (service, center)
    /// is rejected with `Conflict`
    async fn save_offering(&self, offering: CenterOffering) -> DomainResult<CenterOffering>;

    /// Offerings of `service_ids` at the center (available or not)
    async fn find_offerings(
        &self,
        service_center_id: i32,
        service_ids: &[i32],
    ) -> DomainResult<Vec<CenterOffering>>;

    async fn add_closure(&self, closure: CenterClosure) -> DomainResult<()>;

    /// Closure-schedule lookup used by booking validation
    async fn is_closed_on(&self, service_center_id: i32, date: NaiveDate) -> DomainResult<bool>;
}
