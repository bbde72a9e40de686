//! Notification DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Notification;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct NotificationListQuery {
    /// Only unread notifications
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationDto {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub service_reminder_id: Option<i32>,
    pub title: String,
    pub message: String,
    /// Critical, High or Medium
    pub priority: String,
    pub color: String,
    pub customer_name: String,
    pub vehicle_display: String,
    pub service_name: String,
    pub due_date: Option<NaiveDate>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationDto {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            customer_id: n.customer_id,
            vehicle_id: n.vehicle_id,
            service_reminder_id: n.service_reminder_id,
            title: n.title,
            message: n.message,
            priority: n.priority.as_str().to_string(),
            color: n.color,
            customer_name: n.customer_name,
            vehicle_display: n.vehicle_display,
            service_name: n.service_name,
            due_date: n.due_date,
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}
