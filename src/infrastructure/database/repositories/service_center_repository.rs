//! SeaORM implementation of ServiceCenterRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};

use super::db_err;
use crate::domain::service_center::{
    CenterClosure, CenterOffering, ServiceCenter, ServiceCenterRepository, ServiceCenterStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{
    service_center, service_center_closure, service_center_service,
};

pub struct SeaOrmServiceCenterRepository {
    db: DatabaseConnection,
}

impl SeaOrmServiceCenterRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn center_to_domain(m: service_center::Model) -> ServiceCenter {
    ServiceCenter {
        id: m.id,
        name: m.name,
        status: ServiceCenterStatus::from_str(&m.status),
        latitude: m.latitude,
        longitude: m.longitude,
        default_daily_limit: m.default_daily_limit,
        created_at: m.created_at,
    }
}

fn offering_to_domain(m: service_center_service::Model) -> CenterOffering {
    CenterOffering {
        id: m.id,
        service_center_id: m.service_center_id,
        service_id: m.service_id,
        custom_price: m.custom_price,
        is_available: m.is_available,
    }
}

// ── ServiceCenterRepository impl ────────────────────────────────

#[async_trait]
impl ServiceCenterRepository for SeaOrmServiceCenterRepository {
    async fn save(&self, c: ServiceCenter) -> DomainResult<ServiceCenter> {
        debug!("Saving service center: {}", c.name);

        let model = service_center::ActiveModel {
            id: NotSet,
            name: Set(c.name),
            status: Set(c.status.as_str().to_string()),
            latitude: Set(c.latitude),
            longitude: Set(c.longitude),
            default_daily_limit: Set(c.default_daily_limit),
            created_at: Set(c.created_at),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(center_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ServiceCenter>> {
        let model = service_center::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(center_to_domain))
    }

    async fn save_offering(&self, o: CenterOffering) -> DomainResult<CenterOffering> {
        let existing = service_center_service::Entity::find()
            .filter(service_center_service::Column::ServiceCenterId.eq(o.service_center_id))
            .filter(service_center_service::Column::ServiceId.eq(o.service_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        if existing > 0 {
            return Err(DomainError::Conflict(format!(
                "Service {} is already offered at center {}",
                o.service_id, o.service_center_id
            )));
        }

        let model = service_center_service::ActiveModel {
            id: NotSet,
            service_center_id: Set(o.service_center_id),
            service_id: Set(o.service_id),
            custom_price: Set(o.custom_price),
            is_available: Set(o.is_available),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(offering_to_domain(saved))
    }

    async fn find_offerings(
        &self,
        service_center_id: i32,
        service_ids: &[i32],
    ) -> DomainResult<Vec<CenterOffering>> {
        if service_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = service_center_service::Entity::find()
            .filter(service_center_service::Column::ServiceCenterId.eq(service_center_id))
            .filter(service_center_service::Column::ServiceId.is_in(service_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(offering_to_domain).collect())
    }

    async fn add_closure(&self, closure: CenterClosure) -> DomainResult<()> {
        debug!(
            "Closing service center {} on {}",
            closure.service_center_id, closure.date
        );

        let model = service_center_closure::ActiveModel {
            id: NotSet,
            service_center_id: Set(closure.service_center_id),
            closed_on: Set(closure.date),
            reason: Set(closure.reason),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn is_closed_on(&self, service_center_id: i32, date: NaiveDate) -> DomainResult<bool> {
        let count = service_center_closure::Entity::find()
            .filter(service_center_closure::Column::ServiceCenterId.eq(service_center_id))
            .filter(service_center_closure::Column::ClosedOn.eq(date))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }
}
