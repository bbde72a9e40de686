//! SeaORM implementations of ReminderRepository and NotificationRepository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::notification::{
    Notification, NotificationPriority, NotificationRepository, ReminderRepository,
    ServiceReminder,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{notification, service_reminder};

pub struct SeaOrmReminderRepository {
    db: DatabaseConnection,
}

impl SeaOrmReminderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub struct SeaOrmNotificationRepository {
    db: DatabaseConnection,
}

impl SeaOrmNotificationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn reminder_to_domain(m: service_reminder::Model) -> ServiceReminder {
    ServiceReminder {
        id: m.id,
        vehicle_id: m.vehicle_id,
        service_id: m.service_id,
        reminder_date: m.reminder_date,
        notify_before_days: m.notify_before_days,
        is_active: m.is_active,
        note: m.note,
    }
}

fn notification_to_domain(m: notification::Model) -> Notification {
    Notification {
        id: m.id,
        customer_id: m.customer_id,
        vehicle_id: m.vehicle_id,
        service_reminder_id: m.service_reminder_id,
        title: m.title,
        message: m.message,
        priority: NotificationPriority::from_str(&m.priority),
        color: m.color,
        customer_name: m.customer_name,
        vehicle_display: m.vehicle_display,
        service_name: m.service_name,
        due_date: m.due_date,
        is_read: m.is_read,
        created_at: m.created_at,
    }
}

// ── ReminderRepository impl ─────────────────────────────────────

#[async_trait]
impl ReminderRepository for SeaOrmReminderRepository {
    async fn save(&self, r: ServiceReminder) -> DomainResult<ServiceReminder> {
        debug!(
            "Saving reminder for vehicle {} service {} on {}",
            r.vehicle_id, r.service_id, r.reminder_date
        );

        let saved = service_reminder::ActiveModel {
            id: NotSet,
            vehicle_id: Set(r.vehicle_id),
            service_id: Set(r.service_id),
            reminder_date: Set(r.reminder_date),
            notify_before_days: Set(r.notify_before_days),
            is_active: Set(r.is_active),
            note: Set(r.note),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        Ok(reminder_to_domain(saved))
    }

    async fn find_due(&self, today: NaiveDate) -> DomainResult<Vec<ServiceReminder>> {
        // The notify window differs per row, so it is applied after loading
        let models = service_reminder::Entity::find()
            .filter(service_reminder::Column::IsActive.eq(true))
            .order_by_asc(service_reminder::Column::ReminderDate)
            .order_by_asc(service_reminder::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models
            .into_iter()
            .map(reminder_to_domain)
            .filter(|r| r.is_due(today))
            .collect())
    }
}

// ── NotificationRepository impl ─────────────────────────────────

#[async_trait]
impl NotificationRepository for SeaOrmNotificationRepository {
    async fn save(&self, n: Notification) -> DomainResult<Notification> {
        let saved = notification::ActiveModel {
            id: NotSet,
            customer_id: Set(n.customer_id),
            vehicle_id: Set(n.vehicle_id),
            service_reminder_id: Set(n.service_reminder_id),
            title: Set(n.title),
            message: Set(n.message),
            priority: Set(n.priority.as_str().to_string()),
            color: Set(n.color),
            customer_name: Set(n.customer_name),
            vehicle_display: Set(n.vehicle_display),
            service_name: Set(n.service_name),
            due_date: Set(n.due_date),
            is_read: Set(n.is_read),
            created_at: Set(n.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        Ok(notification_to_domain(saved))
    }

    async fn exists_for_reminder_since(
        &self,
        service_reminder_id: i32,
        since: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let count = notification::Entity::find()
            .filter(notification::Column::ServiceReminderId.eq(service_reminder_id))
            .filter(notification::Column::CreatedAt.gte(since))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn find_for_customer(
        &self,
        customer_id: i32,
        unread_only: bool,
    ) -> DomainResult<Vec<Notification>> {
        let mut query =
            notification::Entity::find().filter(notification::Column::CustomerId.eq(customer_id));
        if unread_only {
            query = query.filter(notification::Column::IsRead.eq(false));
        }

        let models = query
            .order_by_desc(notification::Column::CreatedAt)
            .order_by_desc(notification::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(notification_to_domain).collect())
    }

    async fn count_for_reminder(&self, service_reminder_id: i32) -> DomainResult<u64> {
        notification::Entity::find()
            .filter(notification::Column::ServiceReminderId.eq(service_reminder_id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn mark_read(&self, id: i32) -> DomainResult<()> {
        let result = notification::Entity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Notification", "id", id));
        }
        Ok(())
    }
}
