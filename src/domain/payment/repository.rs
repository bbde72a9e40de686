//! Payment repository interface

use async_trait::async_trait;

use super::model::{PaymentLog, PaymentStatus};
use crate::domain::DomainResult;

/// Outcome written onto a claimed payment row
#[derive(Debug, Clone)]
pub struct Settlement {
    pub payment_id: i32,
    pub status: PaymentStatus,
    pub transaction_reference: Option<String>,
    pub failure_reason: Option<String>,
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Claim the appointment's advance/final flag (only if not already set)
    /// and append a `Pending` log row, in one transaction. Fails with
    /// `Validation` and writes nothing when the flag was already set.
    async fn claim(&self, log: PaymentLog) -> DomainResult<PaymentLog>;

    /// Write the gateway outcome onto a claimed row. A `Failed` outcome
    /// also releases the flag taken by `claim`.
    async fn settle(&self, settlement: Settlement) -> DomainResult<PaymentLog>;

    async fn find_for_appointment(&self, appointment_id: i32) -> DomainResult<Vec<PaymentLog>>;
}
