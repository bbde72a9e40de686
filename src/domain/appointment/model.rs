//! Appointment domain entity

use chrono::{DateTime, NaiveDate, Utc};

/// Appointment lifecycle.
///
/// Valid transitions:
/// Pending → Confirmed, Pending → Cancelled,
/// Confirmed → Completed, Confirmed → Cancelled.
/// Completed and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Confirmed" => Some(Self::Confirmed),
            "Completed" => Some(Self::Completed),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }

    /// States holding a reserved slot
    pub fn holds_slot(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Selected service with a price snapshot taken at booking time
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentLine {
    pub service_id: i32,
    pub service_name: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub service_center_id: i32,
    pub appointment_date: NaiveDate,
    pub status: AppointmentStatus,
    pub estimated_total_cost: i64,
    pub actual_total_cost: Option<i64>,
    pub discount_amount: i64,
    pub package_id: Option<i32>,
    /// Points credited to the customer when the appointment completes
    pub loyalty_points: i32,
    pub is_advance_payment_completed: bool,
    pub is_fully_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lines: Vec<AppointmentLine>,
}

/// Validated and priced booking, ready to be persisted together with its
/// slot reservation
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub service_center_id: i32,
    pub appointment_date: NaiveDate,
    pub estimated_total_cost: i64,
    pub discount_amount: i64,
    pub package_id: Option<i32>,
    pub loyalty_points: i32,
    pub lines: Vec<AppointmentLine>,
}

/// Result of a cancellation request
#[derive(Debug, Clone, PartialEq)]
pub enum CancelOutcome {
    /// Status moved to Cancelled and the slot was released
    Cancelled(Appointment),
    /// Already cancelled; nothing changed
    AlreadyCancelled(Appointment),
}

impl CancelOutcome {
    pub fn appointment(&self) -> &Appointment {
        match self {
            Self::Cancelled(a) | Self::AlreadyCancelled(a) => a,
        }
    }
}

/// Settlement data applied when an appointment completes
#[derive(Debug, Clone)]
pub struct Completion {
    pub appointment_id: i32,
    pub actual_total_cost: i64,
    pub completed_at: DateTime<Utc>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::*;

    #[test]
    fn allowed_transitions() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));
    }

    #[test]
    fn terminal_states_do_not_move() {
        for next in [Pending, Confirmed, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
        assert!(!Pending.can_transition_to(Completed));
    }

    #[test]
    fn parse_rejects_free_text() {
        assert_eq!(AppointmentStatus::parse("Confirmed"), Some(Confirmed));
        assert_eq!(AppointmentStatus::parse("confirmed"), None);
        assert_eq!(AppointmentStatus::parse("InProgress"), None);
    }

    #[test]
    fn only_open_appointments_hold_slots() {
        assert!(Pending.holds_slot());
        assert!(Confirmed.holds_slot());
        assert!(!Completed.holds_slot());
        assert!(!Cancelled.holds_slot());
    }
}
