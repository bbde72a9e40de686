//! Vehicle ownership transfer workflow

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, TransferStatus, VehicleTransfer,
};

pub struct TransferService {
    repos: Arc<dyn RepositoryProvider>,
    ttl: Duration,
}

impl TransferService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, ttl_hours: i64) -> Self {
        Self {
            repos,
            ttl: Duration::hours(ttl_hours.max(1)),
        }
    }

    /// Open a Pending transfer. At most one may be pending per vehicle.
    pub async fn create(
        &self,
        vehicle_id: i32,
        from_customer_id: i32,
        to_customer_id: i32,
    ) -> DomainResult<VehicleTransfer> {
        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", "id", vehicle_id))?;

        if !vehicle.is_owned_by(from_customer_id) {
            return Err(DomainError::Validation(format!(
                "Vehicle {} is not owned by customer {}",
                vehicle_id, from_customer_id
            )));
        }
        if from_customer_id == to_customer_id {
            return Err(DomainError::Validation(
                "Cannot transfer a vehicle to its current owner".to_string(),
            ));
        }

        self.repos
            .customers()
            .find_by_id(to_customer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", "id", to_customer_id))?;

        if let Some(pending) = self
            .repos
            .transfers()
            .find_pending_for_vehicle(vehicle_id)
            .await?
        {
            let now = Utc::now();
            if pending.is_overdue(now) {
                self.repos
                    .transfers()
                    .resolve_if_pending(pending.id, TransferStatus::Expired, now)
                    .await?;
            } else {
                return Err(DomainError::Conflict(format!(
                    "Vehicle {} already has pending transfer {}",
                    vehicle_id, pending.id
                )));
            }
        }

        let transfer = self
            .repos
            .transfers()
            .save(VehicleTransfer::new(
                vehicle_id,
                from_customer_id,
                to_customer_id,
                self.ttl,
            ))
            .await?;

        info!(
            transfer_id = transfer.id,
            vehicle_id,
            from_customer_id,
            to_customer_id,
            expires_at = %transfer.expires_at,
            "Vehicle transfer requested"
        );
        Ok(transfer)
    }

    pub async fn get(&self, id: i32) -> DomainResult<VehicleTransfer> {
        self.repos
            .transfers()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("VehicleTransfer", "id", id))
    }

    /// Recipient accepts; the vehicle changes owner atomically
    pub async fn accept(&self, id: i32, customer_id: i32) -> DomainResult<VehicleTransfer> {
        let transfer = self.pending_for_recipient(id, customer_id).await?;
        let now = Utc::now();

        if transfer.is_overdue(now) {
            self.repos
                .transfers()
                .resolve_if_pending(id, TransferStatus::Expired, now)
                .await?;
            return Err(DomainError::Validation(format!(
                "Transfer {} expired at {}",
                id, transfer.expires_at
            )));
        }

        self.repos.transfers().accept(id, now).await
    }

    pub async fn reject(&self, id: i32, customer_id: i32) -> DomainResult<VehicleTransfer> {
        self.pending_for_recipient(id, customer_id).await?;

        let changed = self
            .repos
            .transfers()
            .resolve_if_pending(id, TransferStatus::Rejected, Utc::now())
            .await?;
        if !changed {
            return Err(DomainError::Conflict(format!(
                "Transfer {} is no longer pending",
                id
            )));
        }

        info!(transfer_id = id, "Vehicle transfer rejected");
        self.get(id).await
    }

    /// Mark overdue pending transfers Expired; returns how many changed
    pub async fn expire_overdue(&self, now: DateTime<Utc>) -> DomainResult<usize> {
        let overdue = self.repos.transfers().find_overdue(now).await?;
        let mut expired = 0;
        for transfer in overdue {
            if self
                .repos
                .transfers()
                .resolve_if_pending(transfer.id, TransferStatus::Expired, now)
                .await?
            {
                expired += 1;
            }
        }
        Ok(expired)
    }

    async fn pending_for_recipient(
        &self,
        id: i32,
        customer_id: i32,
    ) -> DomainResult<VehicleTransfer> {
        let transfer = self.get(id).await?;

        if transfer.to_customer_id != customer_id {
            return Err(DomainError::Validation(format!(
                "Customer {} is not the recipient of transfer {}",
                customer_id, id
            )));
        }
        if !transfer.is_pending() {
            return Err(DomainError::Conflict(format!(
                "Transfer {} is already {}",
                id, transfer.status
            )));
        }
        Ok(transfer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::*;

    async fn setup() -> (Fixture, TransferService, crate::domain::Customer) {
        let f = fixture().await;
        let buyer = seed_customer(&*f.repos, "Ravi Kumar", "ravi@example.com").await;
        let svc = TransferService::new(f.repos.clone(), 72);
        (f, svc, buyer)
    }

    #[tokio::test]
    async fn accept_reassigns_owner() {
        let (f, svc, buyer) = setup().await;

        let t = svc.create(f.vehicle.id, f.customer.id, buyer.id).await.unwrap();
        assert_eq!(t.status, TransferStatus::Pending);

        let accepted = svc.accept(t.id, buyer.id).await.unwrap();
        assert_eq!(accepted.status, TransferStatus::Accepted);
        assert!(accepted.resolved_at.is_some());

        let vehicle = f.repos.vehicles().find_by_id(f.vehicle.id).await.unwrap().unwrap();
        assert_eq!(vehicle.customer_id, buyer.id);

        // Terminal
        assert!(matches!(
            svc.reject(t.id, buyer.id).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn only_recipient_may_answer() {
        let (f, svc, buyer) = setup().await;
        let t = svc.create(f.vehicle.id, f.customer.id, buyer.id).await.unwrap();

        assert!(matches!(
            svc.accept(t.id, f.customer.id).await,
            Err(DomainError::Validation(_))
        ));

        let rejected = svc.reject(t.id, buyer.id).await.unwrap();
        assert_eq!(rejected.status, TransferStatus::Rejected);

        let vehicle = f.repos.vehicles().find_by_id(f.vehicle.id).await.unwrap().unwrap();
        assert_eq!(vehicle.customer_id, f.customer.id);
    }

    #[tokio::test]
    async fn one_pending_transfer_per_vehicle() {
        let (f, svc, buyer) = setup().await;
        svc.create(f.vehicle.id, f.customer.id, buyer.id).await.unwrap();
        assert!(matches!(
            svc.create(f.vehicle.id, f.customer.id, buyer.id).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn sender_must_own_vehicle_and_differ_from_recipient() {
        let (f, svc, buyer) = setup().await;
        assert!(matches!(
            svc.create(f.vehicle.id, buyer.id, f.customer.id).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.create(f.vehicle.id, f.customer.id, f.customer.id).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.create(f.vehicle.id, f.customer.id, 4040).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn expired_transfer_cannot_be_accepted() {
        let (f, _, buyer) = setup().await;
        let t = f
            .repos
            .transfers()
            .save(VehicleTransfer::new(
                f.vehicle.id,
                f.customer.id,
                buyer.id,
                Duration::hours(-1),
            ))
            .await
            .unwrap();
        let svc = TransferService::new(f.repos.clone(), 72);

        assert!(matches!(
            svc.accept(t.id, buyer.id).await,
            Err(DomainError::Validation(_))
        ));
        assert_eq!(svc.get(t.id).await.unwrap().status, TransferStatus::Expired);

        let vehicle = f.repos.vehicles().find_by_id(f.vehicle.id).await.unwrap().unwrap();
        assert_eq!(vehicle.customer_id, f.customer.id);
    }

    #[tokio::test]
    async fn sweep_expires_overdue_only() {
        let (f, svc, buyer) = setup().await;
        let fresh = svc.create(f.vehicle.id, f.customer.id, buyer.id).await.unwrap();

        let other_vehicle = seed_vehicle(&*f.repos, f.customer.id, "KA-02-9999").await;
        let stale = f
            .repos
            .transfers()
            .save(VehicleTransfer::new(
                other_vehicle.id,
                f.customer.id,
                buyer.id,
                Duration::hours(-2),
            ))
            .await
            .unwrap();

        assert_eq!(svc.expire_overdue(Utc::now()).await.unwrap(), 1);
        assert_eq!(svc.get(stale.id).await.unwrap().status, TransferStatus::Expired);
        assert_eq!(svc.get(fresh.id).await.unwrap().status, TransferStatus::Pending);
        assert_eq!(svc.expire_overdue(Utc::now()).await.unwrap(), 0);
    }
}
