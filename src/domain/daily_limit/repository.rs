//! Daily limit repository interface
//!
//! Implementations must serialize the read-check-increment per
//! (center, date) key in the storage engine, never in process memory:
//! several server instances may share one database.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::DailyUsage;
use crate::domain::DomainResult;

#[async_trait]
pub trait DailyLimitRepository: Send + Sync {
    /// Atomically consume `units` of capacity.
    ///
    /// The (center, date) record is created with `used = 0` and
    /// `max = default_max` if absent. Fails with `CapacityExceeded`
    /// without mutation when `used + units > max`.
    async fn try_reserve(
        &self,
        service_center_id: i32,
        date: NaiveDate,
        units: i32,
        default_max: i32,
    ) -> DomainResult<DailyUsage>;

    /// Give back `units`, flooring `used` at 0. Returns `None` when no
    /// record exists for the key (nothing was ever reserved).
    async fn release(
        &self,
        service_center_id: i32,
        date: NaiveDate,
        units: i32,
    ) -> DomainResult<Option<DailyUsage>>;

    async fn find(&self, service_center_id: i32, date: NaiveDate)
        -> DomainResult<Option<DailyUsage>>;

    /// Upsert an explicit maximum for one date. Rejected with `Validation`
    /// when it would drop below the capacity already in use.
    async fn set_max(
        &self,
        service_center_id: i32,
        date: NaiveDate,
        max_appointments: i32,
    ) -> DomainResult<DailyUsage>;
}
