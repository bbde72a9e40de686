//! Daily capacity allocator
//!
//! Resolves the effective capacity of a (service center, date) pair and
//! forwards reservations to the daily-limit repository, which performs the
//! check-and-increment atomically in the database.
//!
//! Capacity precedence: explicit per-date row, then the center's own
//! default, then the global default from configuration.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::{DailyUsage, DomainError, DomainResult, RepositoryProvider};

pub struct SlotAllocator {
    repos: Arc<dyn RepositoryProvider>,
    default_daily_limit: i32,
}

impl SlotAllocator {
    pub fn new(repos: Arc<dyn RepositoryProvider>, default_daily_limit: i32) -> Self {
        Self {
            repos,
            default_daily_limit: default_daily_limit.max(0),
        }
    }

    /// Capacity applied when a date has no explicit daily-limit row yet
    pub async fn default_capacity(&self, service_center_id: i32) -> DomainResult<i32> {
        let center = self
            .repos
            .service_centers()
            .find_by_id(service_center_id)
            .await?
            .ok_or_else(|| DomainError::not_found("ServiceCenter", "id", service_center_id))?;
        Ok(center.daily_capacity(self.default_daily_limit))
    }

    /// Consume `units` of capacity or fail with `CapacityExceeded`
    pub async fn try_reserve(
        &self,
        service_center_id: i32,
        date: NaiveDate,
        units: i32,
    ) -> DomainResult<DailyUsage> {
        let capacity = self.default_capacity(service_center_id).await?;
        let usage = self
            .repos
            .daily_limits()
            .try_reserve(service_center_id, date, units, capacity)
            .await?;

        debug!(
            service_center_id,
            %date,
            used = usage.used,
            max = usage.max_appointments,
            "Slot reserved"
        );
        Ok(usage)
    }

    /// Give back `units`; never drives usage below zero
    pub async fn release(
        &self,
        service_center_id: i32,
        date: NaiveDate,
        units: i32,
    ) -> DomainResult<DailyUsage> {
        match self
            .repos
            .daily_limits()
            .release(service_center_id, date, units)
            .await?
        {
            Some(usage) => Ok(usage),
            None => self.availability(service_center_id, date).await,
        }
    }

    /// Current usage without creating a record
    pub async fn availability(
        &self,
        service_center_id: i32,
        date: NaiveDate,
    ) -> DomainResult<DailyUsage> {
        let capacity = self.default_capacity(service_center_id).await?;
        let usage = self
            .repos
            .daily_limits()
            .find(service_center_id, date)
            .await?;
        Ok(usage.unwrap_or_else(|| DailyUsage::empty(service_center_id, date, capacity)))
    }

    /// Override the capacity of one date
    pub async fn set_daily_limit(
        &self,
        service_center_id: i32,
        date: NaiveDate,
        max_appointments: i32,
    ) -> DomainResult<DailyUsage> {
        if max_appointments < 0 {
            return Err(DomainError::Validation(
                "max_appointments must be zero or greater".to_string(),
            ));
        }

        // Existence check only; the explicit max replaces the default
        self.default_capacity(service_center_id).await?;

        let usage = self
            .repos
            .daily_limits()
            .set_max(service_center_id, date, max_appointments)
            .await?;

        info!(
            service_center_id,
            %date,
            max = usage.max_appointments,
            used = usage.used,
            "Daily limit updated"
        );
        Ok(usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{seed_center, test_repos, FileDb};
    use chrono::Duration;

    fn day() -> NaiveDate {
        chrono::Utc::now().date_naive() + Duration::days(10)
    }

    #[tokio::test]
    async fn reserve_until_capacity_then_reject() {
        let repos = test_repos().await;
        let center = seed_center(&*repos, "Downtown", Some(2)).await;
        let slots = SlotAllocator::new(repos.clone(), 10);

        slots.try_reserve(center.id, day(), 1).await.unwrap();
        let usage = slots.try_reserve(center.id, day(), 1).await.unwrap();
        assert_eq!(usage.used, 2);
        assert_eq!(usage.remaining(), 0);

        let err = slots.try_reserve(center.id, day(), 1).await.unwrap_err();
        assert!(matches!(err, DomainError::CapacityExceeded { max: 2, .. }));

        // Rejected reservation leaves the counter untouched
        assert_eq!(slots.availability(center.id, day()).await.unwrap().used, 2);
    }

    #[tokio::test]
    async fn multi_unit_reservation_is_all_or_nothing() {
        let repos = test_repos().await;
        let center = seed_center(&*repos, "Downtown", Some(3)).await;
        let slots = SlotAllocator::new(repos.clone(), 10);

        slots.try_reserve(center.id, day(), 2).await.unwrap();
        assert!(slots.try_reserve(center.id, day(), 2).await.is_err());
        assert_eq!(slots.availability(center.id, day()).await.unwrap().used, 2);
    }

    #[tokio::test]
    async fn global_default_applies_without_center_limit() {
        let repos = test_repos().await;
        let center = seed_center(&*repos, "Airport", None).await;
        let slots = SlotAllocator::new(repos.clone(), 3);

        let usage = slots.availability(center.id, day()).await.unwrap();
        assert_eq!(usage.max_appointments, 3);
        assert_eq!(usage.used, 0);
    }

    #[tokio::test]
    async fn release_restores_previous_usage() {
        let repos = test_repos().await;
        let center = seed_center(&*repos, "Downtown", Some(5)).await;
        let slots = SlotAllocator::new(repos.clone(), 10);

        slots.try_reserve(center.id, day(), 1).await.unwrap();
        let before = slots.availability(center.id, day()).await.unwrap().used;
        slots.try_reserve(center.id, day(), 1).await.unwrap();
        let after = slots.release(center.id, day(), 1).await.unwrap();
        assert_eq!(after.used, before);
    }

    #[tokio::test]
    async fn release_never_goes_negative() {
        let repos = test_repos().await;
        let center = seed_center(&*repos, "Downtown", Some(5)).await;
        let slots = SlotAllocator::new(repos.clone(), 10);

        // No row at all
        let usage = slots.release(center.id, day(), 1).await.unwrap();
        assert_eq!(usage.used, 0);

        slots.try_reserve(center.id, day(), 1).await.unwrap();
        let usage = slots.release(center.id, day(), 3).await.unwrap();
        assert_eq!(usage.used, 0);
    }

    #[tokio::test]
    async fn availability_does_not_create_rows() {
        let repos = test_repos().await;
        let center = seed_center(&*repos, "Downtown", Some(5)).await;
        let slots = SlotAllocator::new(repos.clone(), 10);

        slots.availability(center.id, day()).await.unwrap();
        assert!(repos.daily_limits().find(center.id, day()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn daily_limit_cannot_drop_below_usage() {
        let repos = test_repos().await;
        let center = seed_center(&*repos, "Downtown", Some(5)).await;
        let slots = SlotAllocator::new(repos.clone(), 10);

        slots.try_reserve(center.id, day(), 2).await.unwrap();
        let err = slots.set_daily_limit(center.id, day(), 1).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let usage = slots.set_daily_limit(center.id, day(), 2).await.unwrap();
        assert_eq!(usage.max_appointments, 2);
        assert!(slots.try_reserve(center.id, day(), 1).await.is_err());

        assert!(matches!(
            slots.set_daily_limit(center.id, day(), -1).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn explicit_limit_on_fresh_date() {
        let repos = test_repos().await;
        let center = seed_center(&*repos, "Downtown", Some(1)).await;
        let slots = SlotAllocator::new(repos.clone(), 10);

        slots.set_daily_limit(center.id, day(), 4).await.unwrap();
        for _ in 0..4 {
            slots.try_reserve(center.id, day(), 1).await.unwrap();
        }
        assert!(slots.try_reserve(center.id, day(), 1).await.is_err());
    }

    #[tokio::test]
    async fn unknown_center_is_not_found() {
        let repos = test_repos().await;
        let slots = SlotAllocator::new(repos, 10);
        assert!(matches!(
            slots.try_reserve(999, day(), 1).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn parallel_reservations_never_exceed_capacity() {
        const CAPACITY: i32 = 3;
        const ATTEMPTS: usize = 12;

        let repos = test_repos().await;
        let center = seed_center(&*repos, "Highway Auto Center", Some(CAPACITY)).await;
        let slots = Arc::new(SlotAllocator::new(repos.clone(), 10));

        let mut handles = Vec::new();
        for _ in 0..ATTEMPTS {
            let slots = slots.clone();
            let center_id = center.id;
            handles.push(tokio::spawn(async move {
                slots.try_reserve(center_id, day(), 1).await
            }));
        }

        let mut ok = 0;
        let mut exceeded = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(DomainError::CapacityExceeded { .. }) => exceeded += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(ok, CAPACITY as usize);
        assert_eq!(exceeded, ATTEMPTS - CAPACITY as usize);
        let usage = slots.availability(center.id, day()).await.unwrap();
        assert_eq!(usage.used, CAPACITY);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_reservations_across_pooled_connections() {
        const CAPACITY: i32 = 4;
        const ATTEMPTS: usize = 16;

        let file = FileDb::new(8).await;
        let center = seed_center(&*file.repos, "Ring Road Garage", Some(CAPACITY)).await;
        let slots = Arc::new(SlotAllocator::new(file.repos.clone(), 10));

        let handles: Vec<_> = (0..ATTEMPTS)
            .map(|_| {
                let slots = slots.clone();
                let center_id = center.id;
                tokio::spawn(async move { slots.try_reserve(center_id, day(), 1).await })
            })
            .collect();

        let mut ok = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(DomainError::CapacityExceeded { .. }) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(ok, CAPACITY as usize);
        assert_eq!(slots.availability(center.id, day()).await.unwrap().used, CAPACITY);
    }
}
