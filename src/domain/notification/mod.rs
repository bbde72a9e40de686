//! Service reminders and the notifications generated from them

pub mod model;
pub mod repository;

pub use model::{Notification, NotificationPriority, ServiceReminder};
pub use repository::{NotificationRepository, ReminderRepository};
