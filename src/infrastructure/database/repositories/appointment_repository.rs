//! SeaORM implementation of AppointmentRepository
//!
//! Slot accounting and appointment rows change together: booking,
//! cancellation and completion each run in a single transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::{db_err, slots};
use crate::domain::appointment::{
    Appointment, AppointmentLine, AppointmentRepository, AppointmentStatus, CancelOutcome,
    Completion, NewAppointment,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{
    appointment, appointment_service, customer, service_history,
};
use crate::shared::{PaginatedResult, PaginationParams};

pub struct SeaOrmAppointmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmAppointmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn parse_status(m: &appointment::Model) -> DomainResult<AppointmentStatus> {
    AppointmentStatus::parse(&m.status).ok_or_else(|| {
        DomainError::InvariantViolation(format!(
            "Appointment {} has unknown status '{}'",
            m.id, m.status
        ))
    })
}

fn line_to_domain(m: appointment_service::Model) -> AppointmentLine {
    AppointmentLine {
        service_id: m.service_id,
        service_name: m.service_name,
        price: m.price,
    }
}

fn model_to_domain(
    m: appointment::Model,
    lines: Vec<AppointmentLine>,
) -> DomainResult<Appointment> {
    let status = parse_status(&m)?;
    Ok(Appointment {
        id: m.id,
        customer_id: m.customer_id,
        vehicle_id: m.vehicle_id,
        service_center_id: m.service_center_id,
        appointment_date: m.appointment_date,
        status,
        estimated_total_cost: m.estimated_total_cost,
        actual_total_cost: m.actual_total_cost,
        discount_amount: m.discount_amount,
        package_id: m.package_id,
        loyalty_points: m.loyalty_points,
        is_advance_payment_completed: m.is_advance_payment_completed,
        is_fully_paid: m.is_fully_paid,
        created_at: m.created_at,
        updated_at: m.updated_at,
        lines,
    })
}

async fn load<C: ConnectionTrait>(conn: &C, id: i32) -> DomainResult<Option<Appointment>> {
    let Some(model) = appointment::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err)?
    else {
        return Ok(None);
    };

    let lines = appointment_service::Entity::find()
        .filter(appointment_service::Column::AppointmentId.eq(id))
        .order_by_asc(appointment_service::Column::Id)
        .all(conn)
        .await
        .map_err(db_err)?;

    model_to_domain(model, lines.into_iter().map(line_to_domain).collect()).map(Some)
}

async fn load_existing<C: ConnectionTrait>(conn: &C, id: i32) -> DomainResult<Appointment> {
    load(conn, id)
        .await?
        .ok_or_else(|| DomainError::not_found("Appointment", "id", id))
}

/// Conditional status write; the `from` filter makes concurrent writers
/// race on the row rather than overwrite each other
async fn transition<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> DomainResult<bool> {
    let result = appointment::Entity::update_many()
        .col_expr(appointment::Column::Status, Expr::value(to.as_str()))
        .col_expr(appointment::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(appointment::Column::Id.eq(id))
        .filter(appointment::Column::Status.eq(from.as_str()))
        .exec(conn)
        .await
        .map_err(db_err)?;
    Ok(result.rows_affected > 0)
}

// ── AppointmentRepository impl ──────────────────────────────────

#[async_trait]
impl AppointmentRepository for SeaOrmAppointmentRepository {
    async fn create_with_slot(
        &self,
        draft: NewAppointment,
        default_capacity: i32,
    ) -> DomainResult<Appointment> {
        debug!(
            "Booking vehicle {} at center {} on {}",
            draft.vehicle_id, draft.service_center_id, draft.appointment_date
        );

        let txn = self.db.begin().await.map_err(db_err)?;

        // Dropping `txn` on any early return rolls the reservation back
        slots::reserve(
            &txn,
            draft.service_center_id,
            draft.appointment_date,
            1,
            default_capacity,
        )
        .await?;

        let now = Utc::now();
        let saved = appointment::ActiveModel {
            id: NotSet,
            customer_id: Set(draft.customer_id),
            vehicle_id: Set(draft.vehicle_id),
            service_center_id: Set(draft.service_center_id),
            appointment_date: Set(draft.appointment_date),
            status: Set(AppointmentStatus::Pending.as_str().to_string()),
            estimated_total_cost: Set(draft.estimated_total_cost),
            actual_total_cost: Set(None),
            discount_amount: Set(draft.discount_amount),
            package_id: Set(draft.package_id),
            loyalty_points: Set(draft.loyalty_points),
            is_advance_payment_completed: Set(false),
            is_fully_paid: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        for line in &draft.lines {
            appointment_service::ActiveModel {
                id: NotSet,
                appointment_id: Set(saved.id),
                service_id: Set(line.service_id),
                service_name: Set(line.service_name.clone()),
                price: Set(line.price),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        model_to_domain(saved, draft.lines)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Appointment>> {
        load(&self.db, id).await
    }

    async fn find_for_customer(
        &self,
        customer_id: i32,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<Appointment>> {
        let paginator = appointment::Entity::find()
            .filter(appointment::Column::CustomerId.eq(customer_id))
            .order_by_desc(appointment::Column::AppointmentDate)
            .order_by_desc(appointment::Column::Id)
            .paginate(&self.db, pagination.limit as u64);

        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page(pagination.page_index())
            .await
            .map_err(db_err)?;

        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut lines: HashMap<i32, Vec<AppointmentLine>> = HashMap::new();
        if !ids.is_empty() {
            let rows = appointment_service::Entity::find()
                .filter(appointment_service::Column::AppointmentId.is_in(ids))
                .order_by_asc(appointment_service::Column::Id)
                .all(&self.db)
                .await
                .map_err(db_err)?;
            for row in rows {
                lines
                    .entry(row.appointment_id)
                    .or_default()
                    .push(line_to_domain(row));
            }
        }

        let items = models
            .into_iter()
            .map(|m| {
                let own = lines.remove(&m.id).unwrap_or_default();
                model_to_domain(m, own)
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(PaginatedResult::new(
            items,
            total,
            pagination.page,
            pagination.limit,
        ))
    }

    async fn update_status_if(
        &self,
        id: i32,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> DomainResult<bool> {
        transition(&self.db, id, from, to).await
    }

    async fn cancel(&self, id: i32) -> DomainResult<CancelOutcome> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let current = load_existing(&txn, id).await?;
        match current.status {
            AppointmentStatus::Cancelled => return Ok(CancelOutcome::AlreadyCancelled(current)),
            AppointmentStatus::Completed => {
                return Err(DomainError::Validation(format!(
                    "Appointment {} is already completed and cannot be cancelled",
                    id
                )))
            }
            AppointmentStatus::Pending | AppointmentStatus::Confirmed => {}
        }

        if !transition(&txn, id, current.status, AppointmentStatus::Cancelled).await? {
            return Err(DomainError::Conflict(format!(
                "Appointment {} changed status while cancelling",
                id
            )));
        }

        let usage = slots::release(
            &txn,
            current.service_center_id,
            current.appointment_date,
            1,
        )
        .await?;
        if usage.is_none() {
            warn!(
                "Appointment {} had no daily limit row for center {} on {}",
                id, current.service_center_id, current.appointment_date
            );
        }

        let cancelled = load_existing(&txn, id).await?;
        txn.commit().await.map_err(db_err)?;

        Ok(CancelOutcome::Cancelled(cancelled))
    }

    async fn complete(&self, completion: Completion) -> DomainResult<Appointment> {
        let id = completion.appointment_id;
        let txn = self.db.begin().await.map_err(db_err)?;

        let current = load_existing(&txn, id).await?;
        if !current
            .status
            .can_transition_to(AppointmentStatus::Completed)
        {
            return Err(DomainError::Validation(format!(
                "Appointment {} cannot be completed from status {}",
                id, current.status
            )));
        }

        let result = appointment::Entity::update_many()
            .col_expr(
                appointment::Column::Status,
                Expr::value(AppointmentStatus::Completed.as_str()),
            )
            .col_expr(
                appointment::Column::ActualTotalCost,
                Expr::value(completion.actual_total_cost),
            )
            .col_expr(
                appointment::Column::UpdatedAt,
                Expr::value(completion.completed_at),
            )
            .filter(appointment::Column::Id.eq(id))
            .filter(appointment::Column::Status.eq(current.status.as_str()))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::Conflict(format!(
                "Appointment {} changed status while completing",
                id
            )));
        }

        if current.loyalty_points > 0 {
            customer::Entity::update_many()
                .col_expr(
                    customer::Column::LoyaltyPoints,
                    Expr::col(customer::Column::LoyaltyPoints).add(current.loyalty_points),
                )
                .filter(customer::Column::Id.eq(current.customer_id))
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }

        let service_date = completion.completed_at.date_naive();
        for line in &current.lines {
            service_history::ActiveModel {
                id: NotSet,
                vehicle_id: Set(current.vehicle_id),
                service_id: Set(line.service_id),
                service_center_id: Set(current.service_center_id),
                appointment_id: Set(id),
                service_date: Set(service_date),
                cost: Set(line.price),
                created_at: Set(completion.completed_at),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        let completed = load_existing(&txn, id).await?;
        txn.commit().await.map_err(db_err)?;

        Ok(completed)
    }
}
