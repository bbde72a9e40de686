//! Reminder and notification domain entities

use chrono::{DateTime, Days, NaiveDate, Utc};

/// Scheduled maintenance due date for a vehicle/service pair
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReminder {
    pub id: i32,
    pub vehicle_id: i32,
    pub service_id: i32,
    pub reminder_date: NaiveDate,
    /// How many days ahead of `reminder_date` notifications start
    pub notify_before_days: i32,
    pub is_active: bool,
    pub note: Option<String>,
}

impl ServiceReminder {
    pub fn new(vehicle_id: i32, service_id: i32, reminder_date: NaiveDate, notify_before_days: i32) -> Self {
        Self {
            id: 0,
            vehicle_id,
            service_id,
            reminder_date,
            notify_before_days,
            is_active: true,
            note: None,
        }
    }

    /// `reminder_date <= today + notify_before_days`. A window reaching past
    /// the calendar's end covers every date, so the reminder is due.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        if !self.is_active {
            return false;
        }
        match today.checked_add_days(Days::new(self.notify_before_days.max(0) as u64)) {
            Some(horizon) => self.reminder_date <= horizon,
            None => true,
        }
    }

    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.reminder_date - today).num_days()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPriority {
    Critical,
    High,
    Medium,
}

impl NotificationPriority {
    /// Overdue or due today → Critical, within 3 days → High, else Medium
    pub fn for_days_until_due(days: i64) -> Self {
        if days <= 0 {
            Self::Critical
        } else if days <= 3 {
            Self::High
        } else {
            Self::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Critical" => Self::Critical,
            "High" => Self::High,
            _ => Self::Medium,
        }
    }

    /// Display color for UI badges
    pub fn color(&self) -> &'static str {
        match self {
            Self::Critical => "#DC2626",
            Self::High => "#F59E0B",
            Self::Medium => "#3B82F6",
        }
    }
}

impl std::fmt::Display for NotificationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Generated notification with denormalized display fields
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub service_reminder_id: Option<i32>,
    pub title: String,
    pub message: String,
    pub priority: NotificationPriority,
    pub color: String,
    pub customer_name: String,
    pub vehicle_display: String,
    pub service_name: String,
    pub due_date: Option<NaiveDate>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn due_inside_notify_window() {
        let r = ServiceReminder::new(1, 1, today() + Duration::days(14), 14);
        assert!(r.is_due(today()));
        let r = ServiceReminder::new(1, 1, today() + Duration::days(15), 14);
        assert!(!r.is_due(today()));
    }

    #[test]
    fn huge_notify_window_is_due_without_overflow() {
        let r = ServiceReminder::new(1, 1, today() + Duration::days(400), 200_000_000);
        assert!(r.is_due(today()));
        let r = ServiceReminder::new(1, 1, today(), i32::MAX);
        assert!(r.is_due(NaiveDate::MAX));
    }

    #[test]
    fn inactive_reminder_never_due() {
        let mut r = ServiceReminder::new(1, 1, today(), 14);
        r.is_active = false;
        assert!(!r.is_due(today()));
    }

    #[test]
    fn priority_thresholds() {
        assert_eq!(NotificationPriority::for_days_until_due(-2), NotificationPriority::Critical);
        assert_eq!(NotificationPriority::for_days_until_due(0), NotificationPriority::Critical);
        assert_eq!(NotificationPriority::for_days_until_due(1), NotificationPriority::High);
        assert_eq!(NotificationPriority::for_days_until_due(3), NotificationPriority::High);
        assert_eq!(NotificationPriority::for_days_until_due(4), NotificationPriority::Medium);
    }

    #[test]
    fn priority_colors() {
        assert_eq!(NotificationPriority::Critical.color(), "#DC2626");
        assert_eq!(NotificationPriority::Medium.color(), "#3B82F6");
    }
}
