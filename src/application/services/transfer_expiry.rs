//! Background task that periodically expires overdue vehicle transfers.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{info, warn};

use super::transfers::TransferService;
use crate::shared::shutdown::ShutdownSignal;

/// Start the transfer expiry background task.
///
/// Every `check_interval_secs` pending transfers with `expires_at <= now`
/// are marked `Expired`.
pub fn start_transfer_expiry_task(
    transfers: Arc<TransferService>,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            check_interval = check_interval_secs,
            "🚗 Transfer expiry task started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs.max(1)));

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = shutdown.wait() => break,
            }

            match shutdown.run_until(transfers.expire_overdue(Utc::now())).await {
                Some(Ok(0)) => {}
                Some(Ok(count)) => info!(count, "Expired overdue vehicle transfers"),
                Some(Err(e)) => warn!(error = %e, "Transfer expiry check error"),
                None => break,
            }
        }

        info!("🚗 Transfer expiry task stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::*;
    use crate::domain::{TransferStatus, VehicleTransfer};

    #[tokio::test]
    async fn first_tick_expires_and_shutdown_stops() {
        let f = fixture().await;
        let buyer = seed_customer(&*f.repos, "Ravi Kumar", "ravi@example.com").await;
        let stale = f
            .repos
            .transfers()
            .save(VehicleTransfer::new(
                f.vehicle.id,
                f.customer.id,
                buyer.id,
                chrono::Duration::hours(-1),
            ))
            .await
            .unwrap();

        let svc = Arc::new(TransferService::new(f.repos.clone(), 72));
        let shutdown = ShutdownSignal::new();
        let handle = start_transfer_expiry_task(svc.clone(), shutdown.clone(), 3600);

        for _ in 0..50 {
            if svc.get(stale.id).await.unwrap().status == TransferStatus::Expired {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(svc.get(stale.id).await.unwrap().status, TransferStatus::Expired);

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("task should stop")
            .unwrap();
    }
}
