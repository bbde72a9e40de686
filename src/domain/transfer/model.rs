//! Vehicle transfer domain entity

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Expired => "Expired",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Accepted" => Self::Accepted,
            "Rejected" => Self::Rejected,
            _ => Self::Expired,
        }
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request to move a vehicle from one customer to another.
///
/// Created Pending; Accepted, Rejected and Expired are terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleTransfer {
    pub id: i32,
    pub vehicle_id: i32,
    pub from_customer_id: i32,
    pub to_customer_id: i32,
    pub status: TransferStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl VehicleTransfer {
    pub fn new(vehicle_id: i32, from_customer_id: i32, to_customer_id: i32, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            vehicle_id,
            from_customer_id,
            to_customer_id,
            status: TransferStatus::Pending,
            expires_at: now + ttl,
            created_at: now,
            resolved_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TransferStatus::Pending
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_pending() && now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transfer_is_pending_until_expiry() {
        let t = VehicleTransfer::new(1, 1, 2, Duration::hours(1));
        assert!(t.is_pending());
        assert!(!t.is_overdue(Utc::now()));
        assert!(t.is_overdue(Utc::now() + Duration::hours(2)));
    }

    #[test]
    fn resolved_transfer_is_never_overdue() {
        let mut t = VehicleTransfer::new(1, 1, 2, Duration::hours(-1));
        t.status = TransferStatus::Rejected;
        assert!(!t.is_overdue(Utc::now()));
    }
}
