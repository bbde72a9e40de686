//! SeaORM implementation of DailyLimitRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::DatabaseConnection;

use super::slots;
use crate::domain::daily_limit::{DailyLimitRepository, DailyUsage};
use crate::domain::DomainResult;

pub struct SeaOrmDailyLimitRepository {
    db: DatabaseConnection,
}

impl SeaOrmDailyLimitRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DailyLimitRepository for SeaOrmDailyLimitRepository {
    async fn try_reserve(
        &self,
        service_center_id: i32,
        date: NaiveDate,
        units: i32,
        default_max: i32,
    ) -> DomainResult<DailyUsage> {
        debug!(
            "Reserving {} slot(s) at center {} on {}",
            units, service_center_id, date
        );
        slots::reserve(&self.db, service_center_id, date, units, default_max).await
    }

    async fn release(
        &self,
        service_center_id: i32,
        date: NaiveDate,
        units: i32,
    ) -> DomainResult<Option<DailyUsage>> {
        debug!(
            "Releasing {} slot(s) at center {} on {}",
            units, service_center_id, date
        );
        slots::release(&self.db, service_center_id, date, units).await
    }

    async fn find(
        &self,
        service_center_id: i32,
        date: NaiveDate,
    ) -> DomainResult<Option<DailyUsage>> {
        slots::find(&self.db, service_center_id, date).await
    }

    async fn set_max(
        &self,
        service_center_id: i32,
        date: NaiveDate,
        max_appointments: i32,
    ) -> DomainResult<DailyUsage> {
        slots::set_max(&self.db, service_center_id, date, max_appointments).await
    }
}
