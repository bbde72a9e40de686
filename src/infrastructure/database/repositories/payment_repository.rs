//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::db_err;
use crate::domain::payment::{
    PaymentLog, PaymentMethod, PaymentRepository, PaymentStatus, PaymentType, Settlement,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{appointment, payment_log};

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: payment_log::Model) -> DomainResult<PaymentLog> {
    let method = PaymentMethod::parse(&m.method).ok_or_else(|| {
        DomainError::InvariantViolation(format!(
            "Payment {} has unknown method '{}'",
            m.id, m.method
        ))
    })?;
    let payment_type = PaymentType::parse(&m.payment_type).ok_or_else(|| {
        DomainError::InvariantViolation(format!(
            "Payment {} has unknown type '{}'",
            m.id, m.payment_type
        ))
    })?;

    Ok(PaymentLog {
        id: m.id,
        appointment_id: m.appointment_id,
        amount: m.amount,
        method,
        payment_type,
        status: PaymentStatus::from_str(&m.status),
        transaction_reference: m.transaction_reference,
        failure_reason: m.failure_reason,
        created_at: m.created_at,
    })
}

async fn insert_log<C: ConnectionTrait>(conn: &C, log: PaymentLog) -> DomainResult<PaymentLog> {
    let saved = payment_log::ActiveModel {
        id: NotSet,
        appointment_id: Set(log.appointment_id),
        amount: Set(log.amount),
        method: Set(log.method.as_str().to_string()),
        payment_type: Set(log.payment_type.as_str().to_string()),
        status: Set(log.status.as_str().to_string()),
        transaction_reference: Set(log.transaction_reference),
        failure_reason: Set(log.failure_reason),
        created_at: Set(log.created_at),
    }
    .insert(conn)
    .await
    .map_err(db_err)?;
    model_to_domain(saved)
}

// ── PaymentRepository impl ──────────────────────────────────────

fn flag_column(payment_type: PaymentType) -> appointment::Column {
    match payment_type {
        PaymentType::Advance => appointment::Column::IsAdvancePaymentCompleted,
        PaymentType::Final => appointment::Column::IsFullyPaid,
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn claim(&self, mut log: PaymentLog) -> DomainResult<PaymentLog> {
        debug!(
            "Claiming {} payment of {} for appointment {}",
            log.payment_type.as_str(),
            log.amount,
            log.appointment_id
        );

        let flag = flag_column(log.payment_type);
        let txn = self.db.begin().await.map_err(db_err)?;

        let result = appointment::Entity::update_many()
            .col_expr(flag, Expr::value(true))
            .col_expr(appointment::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(appointment::Column::Id.eq(log.appointment_id))
            .filter(flag.eq(false))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::Validation(format!(
                "{} payment already completed for appointment {}",
                log.payment_type.as_str(),
                log.appointment_id
            )));
        }

        log.status = PaymentStatus::Pending;
        let saved = insert_log(&txn, log).await?;
        txn.commit().await.map_err(db_err)?;
        Ok(saved)
    }

    async fn settle(&self, settlement: Settlement) -> DomainResult<PaymentLog> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let model = payment_log::Entity::find_by_id(settlement.payment_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Payment", "id", settlement.payment_id))?;

        if PaymentStatus::from_str(&model.status) != PaymentStatus::Pending {
            return Err(DomainError::InvariantViolation(format!(
                "Payment {} is already settled as {}",
                model.id, model.status
            )));
        }

        let appointment_id = model.appointment_id;
        let payment_type = model.payment_type.clone();

        let mut active: payment_log::ActiveModel = model.into();
        active.status = Set(settlement.status.as_str().to_string());
        if settlement.transaction_reference.is_some() {
            active.transaction_reference = Set(settlement.transaction_reference);
        }
        active.failure_reason = Set(settlement.failure_reason);
        let updated = active.update(&txn).await.map_err(db_err)?;

        if settlement.status == PaymentStatus::Failed {
            let payment_type = PaymentType::parse(&payment_type).ok_or_else(|| {
                DomainError::InvariantViolation(format!(
                    "Payment {} has unknown type '{}'",
                    updated.id, payment_type
                ))
            })?;
            appointment::Entity::update_many()
                .col_expr(flag_column(payment_type), Expr::value(false))
                .col_expr(appointment::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(appointment::Column::Id.eq(appointment_id))
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        model_to_domain(updated)
    }

    async fn find_for_appointment(&self, appointment_id: i32) -> DomainResult<Vec<PaymentLog>> {
        let models = payment_log::Entity::find()
            .filter(payment_log::Column::AppointmentId.eq(appointment_id))
            .order_by_asc(payment_log::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}
