//! Service center domain entities

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCenterStatus {
    Active,
    Inactive,
}

impl ServiceCenterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Active" => Self::Active,
            _ => Self::Inactive,
        }
    }
}

impl std::fmt::Display for ServiceCenterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Physical workshop accepting appointments
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCenter {
    pub id: i32,
    pub name: String,
    pub status: ServiceCenterStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Per-center capacity; `None` falls back to the global default
    pub default_daily_limit: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl ServiceCenter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            status: ServiceCenterStatus::Active,
            latitude: None,
            longitude: None,
            default_daily_limit: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_daily_limit(mut self, limit: i32) -> Self {
        self.default_daily_limit = Some(limit);
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == ServiceCenterStatus::Active
    }

    /// Capacity for a date without an explicit daily-limit row
    pub fn daily_capacity(&self, global_default: i32) -> i32 {
        self.default_daily_limit.unwrap_or(global_default).max(0)
    }
}

/// A catalog service as offered at one center.
///
/// At most one offering exists per (service, center).
#[derive(Debug, Clone, PartialEq)]
pub struct CenterOffering {
    pub id: i32,
    pub service_center_id: i32,
    pub service_id: i32,
    /// Overrides the catalog base price when set (smallest currency unit)
    pub custom_price: Option<i64>,
    pub is_available: bool,
}

impl CenterOffering {
    pub fn new(service_center_id: i32, service_id: i32, custom_price: Option<i64>) -> Self {
        Self {
            id: 0,
            service_center_id,
            service_id,
            custom_price,
            is_available: true,
        }
    }
}

/// A calendar day on which a center takes no bookings
#[derive(Debug, Clone, PartialEq)]
pub struct CenterClosure {
    pub service_center_id: i32,
    pub date: NaiveDate,
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_prefers_center_limit() {
        let center = ServiceCenter::new("Highway Auto Center").with_daily_limit(1);
        assert_eq!(center.daily_capacity(10), 1);
        assert_eq!(ServiceCenter::new("Downtown").daily_capacity(10), 10);
    }

    #[test]
    fn unknown_status_is_inactive() {
        assert_eq!(
            ServiceCenterStatus::from_str("Closed"),
            ServiceCenterStatus::Inactive
        );
        assert_eq!(
            ServiceCenterStatus::from_str("Active"),
            ServiceCenterStatus::Active
        );
    }
}
