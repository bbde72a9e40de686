//! SeaORM implementation of ServiceHistoryRepository
//!
//! Rows are written by the appointment completion transaction.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::db_err;
use crate::domain::service_history::{ServiceHistoryEntry, ServiceHistoryRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::service_history;

pub struct SeaOrmServiceHistoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmServiceHistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: service_history::Model) -> ServiceHistoryEntry {
    ServiceHistoryEntry {
        id: m.id,
        vehicle_id: m.vehicle_id,
        service_id: m.service_id,
        service_center_id: m.service_center_id,
        appointment_id: m.appointment_id,
        service_date: m.service_date,
        cost: m.cost,
        created_at: m.created_at,
    }
}

#[async_trait]
impl ServiceHistoryRepository for SeaOrmServiceHistoryRepository {
    async fn find_for_vehicle(&self, vehicle_id: i32) -> DomainResult<Vec<ServiceHistoryEntry>> {
        let models = service_history::Entity::find()
            .filter(service_history::Column::VehicleId.eq(vehicle_id))
            .order_by_desc(service_history::Column::ServiceDate)
            .order_by_asc(service_history::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
