//! Appointment payment workflow
//!
//! Records advance and final payments, and settles an appointment on
//! completion (actual cost, loyalty credit, service history).

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use super::payment_gateway::{ChargeRequest, PaymentGateway};
use crate::domain::appointment::Completion;
use crate::domain::payment::Settlement;
use crate::domain::{
    Appointment, AppointmentStatus, DomainError, DomainResult, PaymentLog, PaymentMethod,
    PaymentStatus, PaymentType, RepositoryProvider,
};

#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub appointment_id: i32,
    pub amount: i64,
    pub method: PaymentMethod,
    pub payment_type: PaymentType,
    pub transaction_reference: Option<String>,
}

pub struct PaymentService {
    repos: Arc<dyn RepositoryProvider>,
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { repos, gateway }
    }

    /// Charge through the gateway and record the result.
    ///
    /// The advance/final flag is claimed together with a `Pending` log row
    /// before the gateway is called, so concurrent payments of the same
    /// type cannot both be charged. The row is then settled as `Success`,
    /// or as `Failed` (releasing the flag) with `PaymentDeclined`.
    /// Validation failures write nothing.
    pub async fn record_payment(&self, request: PaymentRequest) -> DomainResult<PaymentLog> {
        if request.amount <= 0 {
            return Err(DomainError::Validation(
                "Payment amount must be greater than zero".to_string(),
            ));
        }

        let appointment = self.load(request.appointment_id).await?;

        if appointment.status == AppointmentStatus::Cancelled {
            return Err(DomainError::Validation(format!(
                "Appointment {} is cancelled and cannot take payments",
                appointment.id
            )));
        }
        if appointment.is_fully_paid {
            return Err(DomainError::Validation(format!(
                "Appointment {} is already fully paid",
                appointment.id
            )));
        }
        if request.payment_type == PaymentType::Advance && appointment.is_advance_payment_completed
        {
            return Err(DomainError::Validation(format!(
                "Advance payment already completed for appointment {}",
                appointment.id
            )));
        }
        if request.payment_type == PaymentType::Final {
            let outstanding = self.outstanding_balance(&appointment).await?;
            if request.amount < outstanding {
                return Err(DomainError::Validation(format!(
                    "Final payment of {} does not cover the outstanding balance of {} for appointment {}",
                    request.amount, outstanding, appointment.id
                )));
            }
        }

        let mut pending = PaymentLog::new(
            appointment.id,
            request.amount,
            request.method,
            request.payment_type,
            PaymentStatus::Pending,
        );
        pending.transaction_reference = request.transaction_reference.clone();
        let pending = self.repos.payments().claim(pending).await?;

        let charge = ChargeRequest {
            appointment_id: appointment.id,
            amount: request.amount,
            method: request.method,
            reference: request.transaction_reference,
        };

        match self.gateway.charge(&charge).await {
            Ok(receipt) => {
                let saved = self
                    .repos
                    .payments()
                    .settle(Settlement {
                        payment_id: pending.id,
                        status: PaymentStatus::Success,
                        transaction_reference: Some(receipt.transaction_reference),
                        failure_reason: None,
                    })
                    .await
                    .map_err(|e| {
                        error!(
                            appointment_id = appointment.id,
                            payment_id = pending.id,
                            error = %e,
                            "Charge succeeded but payment row could not be settled"
                        );
                        e
                    })?;

                metrics::counter!("payments_recorded_total", "status" => "Success").increment(1);
                info!(
                    appointment_id = saved.appointment_id,
                    payment_id = saved.id,
                    amount = saved.amount,
                    payment_type = saved.payment_type.as_str(),
                    method = saved.method.as_str(),
                    "Payment recorded"
                );
                Ok(saved)
            }
            Err(e) => {
                self.repos
                    .payments()
                    .settle(Settlement {
                        payment_id: pending.id,
                        status: PaymentStatus::Failed,
                        transaction_reference: None,
                        failure_reason: Some(e.to_string()),
                    })
                    .await?;

                metrics::counter!("payments_recorded_total", "status" => "Failed").increment(1);
                warn!(
                    appointment_id = appointment.id,
                    amount = request.amount,
                    error = %e,
                    "Payment failed at gateway"
                );
                Err(DomainError::PaymentDeclined(e.to_string()))
            }
        }
    }

    /// Amount still owed: actual cost (or the estimate) minus successful payments
    async fn outstanding_balance(&self, appointment: &Appointment) -> DomainResult<i64> {
        let due = appointment
            .actual_total_cost
            .unwrap_or(appointment.estimated_total_cost);
        let paid: i64 = self
            .repos
            .payments()
            .find_for_appointment(appointment.id)
            .await?
            .iter()
            .filter(|p| p.status == PaymentStatus::Success)
            .map(|p| p.amount)
            .sum();
        Ok((due - paid).max(0))
    }

    pub async fn payment_history(&self, appointment_id: i32) -> DomainResult<Vec<PaymentLog>> {
        self.load(appointment_id).await?;
        self.repos.payments().find_for_appointment(appointment_id).await
    }

    /// Mark Completed. `actual_total_cost` defaults to the estimate.
    pub async fn complete_appointment(
        &self,
        appointment_id: i32,
        actual_total_cost: Option<i64>,
    ) -> DomainResult<Appointment> {
        let appointment = self.load(appointment_id).await?;

        let actual_total_cost = actual_total_cost.unwrap_or(appointment.estimated_total_cost);
        if actual_total_cost < 0 {
            return Err(DomainError::Validation(
                "Actual total cost cannot be negative".to_string(),
            ));
        }

        if !appointment
            .status
            .can_transition_to(AppointmentStatus::Completed)
        {
            return Err(DomainError::Validation(format!(
                "Appointment {} cannot be completed from status {}",
                appointment.id, appointment.status
            )));
        }

        let completed = self
            .repos
            .appointments()
            .complete(Completion {
                appointment_id,
                actual_total_cost,
                completed_at: Utc::now(),
            })
            .await?;

        info!(
            appointment_id,
            actual_total_cost,
            loyalty_points = completed.loyalty_points,
            customer_id = completed.customer_id,
            "Appointment completed"
        );
        Ok(completed)
    }

    async fn load(&self, appointment_id: i32) -> DomainResult<Appointment> {
        self.repos
            .appointments()
            .find_by_id(appointment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Appointment", "id", appointment_id))
    }
}
