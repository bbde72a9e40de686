//! Daily capacity usage record

use chrono::NaiveDate;

/// Capacity usage of one service center on one calendar date.
///
/// Invariant: `0 <= used <= max_appointments`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyUsage {
    pub service_center_id: i32,
    pub date: NaiveDate,
    pub used: i32,
    pub max_appointments: i32,
}

impl DailyUsage {
    /// Usage view for a date that has no stored record yet
    pub fn empty(service_center_id: i32, date: NaiveDate, max_appointments: i32) -> Self {
        Self {
            service_center_id,
            date,
            used: 0,
            max_appointments,
        }
    }

    pub fn remaining(&self) -> i32 {
        (self.max_appointments - self.used).max(0)
    }

    pub fn can_accept(&self, units: i32) -> bool {
        self.used + units <= self.max_appointments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 4).unwrap()
    }

    #[test]
    fn remaining_never_negative() {
        let usage = DailyUsage {
            service_center_id: 1,
            date: day(),
            used: 5,
            max_appointments: 3,
        };
        assert_eq!(usage.remaining(), 0);
        assert!(!usage.can_accept(1));
    }

    #[test]
    fn empty_usage_accepts_up_to_max() {
        let usage = DailyUsage::empty(1, day(), 2);
        assert!(usage.can_accept(2));
        assert!(!usage.can_accept(3));
    }
}
