//! Appointment repository interface

use async_trait::async_trait;

use super::model::{Appointment, AppointmentStatus, CancelOutcome, Completion, NewAppointment};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Reserve one slot for (center, date) and insert the appointment with
    /// its lines, all in one transaction. On `CapacityExceeded` nothing is
    /// written.
    async fn create_with_slot(
        &self,
        draft: NewAppointment,
        default_capacity: i32,
    ) -> DomainResult<Appointment>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Appointment>>;

    async fn find_for_customer(
        &self,
        customer_id: i32,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<Appointment>>;

    /// Move `id` from `from` to `to` only if it is still in `from`.
    /// Returns false when another writer changed the status first.
    async fn update_status_if(
        &self,
        id: i32,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> DomainResult<bool>;

    /// Cancel and release the reserved slot in one transaction.
    /// Idempotent for already-cancelled appointments.
    async fn cancel(&self, id: i32) -> DomainResult<CancelOutcome>;

    /// Mark Completed, set the actual cost, credit loyalty points and write
    /// service history, in one transaction
    async fn complete(&self, completion: Completion) -> DomainResult<Appointment>;
}
