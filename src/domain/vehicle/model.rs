//! Vehicle domain entity

use chrono::{DateTime, Utc};

/// A customer-owned vehicle. Ownership is the `customer_id` foreign key;
/// it only changes through an accepted vehicle transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: i32,
    pub customer_id: i32,
    pub registration_number: String,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(
        customer_id: i32,
        registration_number: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            customer_id,
            registration_number: registration_number.into(),
            make: make.into(),
            model: model.into(),
            year: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, customer_id: i32) -> bool {
        self.customer_id == customer_id
    }

    /// Human-readable label used in notifications
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.registration_number)
    }
}
