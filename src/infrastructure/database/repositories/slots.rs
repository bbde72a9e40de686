//! Capacity counter operations shared by the daily-limit and appointment
//! repositories.
//!
//! Every mutation is a single conditional UPDATE, so the check and the
//! increment happen atomically inside the database. The functions take any
//! `ConnectionTrait` so they run equally on a pool or inside a transaction.

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use super::db_err;
use crate::domain::{DailyUsage, DomainError, DomainResult};
use crate::infrastructure::database::entities::daily_limit;

pub(super) fn to_domain(m: daily_limit::Model) -> DailyUsage {
    DailyUsage {
        service_center_id: m.service_center_id,
        date: m.limit_date,
        used: m.current_appointments,
        max_appointments: m.max_appointments,
    }
}

pub(super) async fn find<C: ConnectionTrait>(
    conn: &C,
    service_center_id: i32,
    date: NaiveDate,
) -> DomainResult<Option<DailyUsage>> {
    let model = daily_limit::Entity::find()
        .filter(daily_limit::Column::ServiceCenterId.eq(service_center_id))
        .filter(daily_limit::Column::LimitDate.eq(date))
        .one(conn)
        .await
        .map_err(db_err)?;
    Ok(model.map(to_domain))
}

/// Create the (center, date) row with `used = 0` unless it already exists
async fn ensure_row<C: ConnectionTrait>(
    conn: &C,
    service_center_id: i32,
    date: NaiveDate,
    max_appointments: i32,
) -> DomainResult<()> {
    let row = daily_limit::ActiveModel {
        id: NotSet,
        service_center_id: Set(service_center_id),
        limit_date: Set(date),
        current_appointments: Set(0),
        max_appointments: Set(max_appointments),
        updated_at: Set(Utc::now()),
    };

    daily_limit::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([
                daily_limit::Column::ServiceCenterId,
                daily_limit::Column::LimitDate,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(db_err)?;
    Ok(())
}

async fn load<C: ConnectionTrait>(
    conn: &C,
    service_center_id: i32,
    date: NaiveDate,
) -> DomainResult<DailyUsage> {
    find(conn, service_center_id, date).await?.ok_or_else(|| {
        DomainError::InvariantViolation(format!(
            "daily limit row for center {} on {} vanished",
            service_center_id, date
        ))
    })
}

pub(super) async fn reserve<C: ConnectionTrait>(
    conn: &C,
    service_center_id: i32,
    date: NaiveDate,
    units: i32,
    default_max: i32,
) -> DomainResult<DailyUsage> {
    if units <= 0 {
        return Err(DomainError::Validation(format!(
            "Reservation units must be positive, got {}",
            units
        )));
    }

    ensure_row(conn, service_center_id, date, default_max.max(0)).await?;

    let result = daily_limit::Entity::update_many()
        .col_expr(
            daily_limit::Column::CurrentAppointments,
            Expr::col(daily_limit::Column::CurrentAppointments).add(units),
        )
        .col_expr(daily_limit::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(daily_limit::Column::ServiceCenterId.eq(service_center_id))
        .filter(daily_limit::Column::LimitDate.eq(date))
        .filter(
            Expr::col(daily_limit::Column::CurrentAppointments)
                .lte(Expr::col(daily_limit::Column::MaxAppointments).sub(units)),
        )
        .exec(conn)
        .await
        .map_err(db_err)?;

    let usage = load(conn, service_center_id, date).await?;
    if result.rows_affected == 0 {
        return Err(DomainError::CapacityExceeded {
            service_center_id,
            date,
            max: usage.max_appointments,
        });
    }
    Ok(usage)
}

pub(super) async fn release<C: ConnectionTrait>(
    conn: &C,
    service_center_id: i32,
    date: NaiveDate,
    units: i32,
) -> DomainResult<Option<DailyUsage>> {
    let units = units.max(0);

    daily_limit::Entity::update_many()
        .col_expr(
            daily_limit::Column::CurrentAppointments,
            Expr::case(
                Expr::col(daily_limit::Column::CurrentAppointments).gte(units),
                Expr::col(daily_limit::Column::CurrentAppointments).sub(units),
            )
            .finally(0)
            .into(),
        )
        .col_expr(daily_limit::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(daily_limit::Column::ServiceCenterId.eq(service_center_id))
        .filter(daily_limit::Column::LimitDate.eq(date))
        .exec(conn)
        .await
        .map_err(db_err)?;

    find(conn, service_center_id, date).await
}

pub(super) async fn set_max<C: ConnectionTrait>(
    conn: &C,
    service_center_id: i32,
    date: NaiveDate,
    max_appointments: i32,
) -> DomainResult<DailyUsage> {
    if max_appointments < 0 {
        return Err(DomainError::Validation(
            "Daily limit cannot be negative".to_string(),
        ));
    }

    ensure_row(conn, service_center_id, date, max_appointments).await?;

    let result = daily_limit::Entity::update_many()
        .col_expr(
            daily_limit::Column::MaxAppointments,
            Expr::value(max_appointments),
        )
        .col_expr(daily_limit::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(daily_limit::Column::ServiceCenterId.eq(service_center_id))
        .filter(daily_limit::Column::LimitDate.eq(date))
        .filter(daily_limit::Column::CurrentAppointments.lte(max_appointments))
        .exec(conn)
        .await
        .map_err(db_err)?;

    let usage = load(conn, service_center_id, date).await?;
    if result.rows_affected == 0 {
        return Err(DomainError::Validation(format!(
            "Cannot lower the limit to {}: {} appointments already booked on {}",
            max_appointments, usage.used, date
        )));
    }
    Ok(usage)
}
