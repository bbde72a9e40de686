//! SeaORM implementation of TransferRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::db_err;
use crate::domain::transfer::{TransferRepository, TransferStatus, VehicleTransfer};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{vehicle, vehicle_transfer};

pub struct SeaOrmTransferRepository {
    db: DatabaseConnection,
}

impl SeaOrmTransferRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: vehicle_transfer::Model) -> VehicleTransfer {
    VehicleTransfer {
        id: m.id,
        vehicle_id: m.vehicle_id,
        from_customer_id: m.from_customer_id,
        to_customer_id: m.to_customer_id,
        status: TransferStatus::from_str(&m.status),
        expires_at: m.expires_at,
        created_at: m.created_at,
        resolved_at: m.resolved_at,
    }
}

#[async_trait]
impl TransferRepository for SeaOrmTransferRepository {
    async fn save(&self, t: VehicleTransfer) -> DomainResult<VehicleTransfer> {
        debug!(
            "Saving transfer of vehicle {} from customer {} to {}",
            t.vehicle_id, t.from_customer_id, t.to_customer_id
        );

        let saved = vehicle_transfer::ActiveModel {
            id: NotSet,
            vehicle_id: Set(t.vehicle_id),
            from_customer_id: Set(t.from_customer_id),
            to_customer_id: Set(t.to_customer_id),
            status: Set(t.status.as_str().to_string()),
            expires_at: Set(t.expires_at),
            created_at: Set(t.created_at),
            resolved_at: Set(t.resolved_at),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<VehicleTransfer>> {
        let model = vehicle_transfer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_pending_for_vehicle(
        &self,
        vehicle_id: i32,
    ) -> DomainResult<Option<VehicleTransfer>> {
        let model = vehicle_transfer::Entity::find()
            .filter(vehicle_transfer::Column::VehicleId.eq(vehicle_id))
            .filter(vehicle_transfer::Column::Status.eq(TransferStatus::Pending.as_str()))
            .order_by_desc(vehicle_transfer::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn accept(&self, id: i32, resolved_at: DateTime<Utc>) -> DomainResult<VehicleTransfer> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let Some(transfer) = vehicle_transfer::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
        else {
            return Err(DomainError::not_found("VehicleTransfer", "id", id));
        };

        let result = vehicle_transfer::Entity::update_many()
            .col_expr(
                vehicle_transfer::Column::Status,
                Expr::value(TransferStatus::Accepted.as_str()),
            )
            .col_expr(vehicle_transfer::Column::ResolvedAt, Expr::value(resolved_at))
            .filter(vehicle_transfer::Column::Id.eq(id))
            .filter(vehicle_transfer::Column::Status.eq(TransferStatus::Pending.as_str()))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::Conflict(format!(
                "Transfer {} is already {}",
                id, transfer.status
            )));
        }

        // Only move the vehicle if the sender still owns it
        let moved = vehicle::Entity::update_many()
            .col_expr(vehicle::Column::CustomerId, Expr::value(transfer.to_customer_id))
            .filter(vehicle::Column::Id.eq(transfer.vehicle_id))
            .filter(vehicle::Column::CustomerId.eq(transfer.from_customer_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if moved.rows_affected == 0 {
            return Err(DomainError::Conflict(format!(
                "Vehicle {} is no longer owned by customer {}",
                transfer.vehicle_id, transfer.from_customer_id
            )));
        }

        let accepted = vehicle_transfer::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("VehicleTransfer", "id", id))?;

        txn.commit().await.map_err(db_err)?;

        info!(
            "Vehicle {} transferred from customer {} to {}",
            transfer.vehicle_id, transfer.from_customer_id, transfer.to_customer_id
        );
        Ok(model_to_domain(accepted))
    }

    async fn resolve_if_pending(
        &self,
        id: i32,
        status: TransferStatus,
        resolved_at: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let result = vehicle_transfer::Entity::update_many()
            .col_expr(vehicle_transfer::Column::Status, Expr::value(status.as_str()))
            .col_expr(vehicle_transfer::Column::ResolvedAt, Expr::value(resolved_at))
            .filter(vehicle_transfer::Column::Id.eq(id))
            .filter(vehicle_transfer::Column::Status.eq(TransferStatus::Pending.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn find_overdue(&self, now: DateTime<Utc>) -> DomainResult<Vec<VehicleTransfer>> {
        let models = vehicle_transfer::Entity::find()
            .filter(vehicle_transfer::Column::Status.eq(TransferStatus::Pending.as_str()))
            .filter(vehicle_transfer::Column::ExpiresAt.lte(now))
            .order_by_asc(vehicle_transfer::Column::ExpiresAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
