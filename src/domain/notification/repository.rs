//! Reminder and notification repository interfaces

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Notification, ServiceReminder};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReminderRepository: Send + Sync {
    async fn save(&self, reminder: ServiceReminder) -> DomainResult<ServiceReminder>;

    /// Active reminders whose notify window has opened by `today`
    async fn find_due(&self, today: chrono::NaiveDate) -> DomainResult<Vec<ServiceReminder>>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn save(&self, notification: Notification) -> DomainResult<Notification>;

    /// Whether a notification for the reminder was created at or after `since`
    async fn exists_for_reminder_since(
        &self,
        service_reminder_id: i32,
        since: DateTime<Utc>,
    ) -> DomainResult<bool>;

    async fn find_for_customer(
        &self,
        customer_id: i32,
        unread_only: bool,
    ) -> DomainResult<Vec<Notification>>;

    async fn count_for_reminder(&self, service_reminder_id: i32) -> DomainResult<u64>;

    async fn mark_read(&self, id: i32) -> DomainResult<()>;
}
