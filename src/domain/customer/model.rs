//! Customer domain entity

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Reward balance credited on completed appointments
    pub loyalty_points: i32,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Build an unsaved customer; `id` is assigned by the repository.
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: 0,
            full_name: full_name.into(),
            email: email.into(),
            phone: None,
            loyalty_points: 0,
            created_at: Utc::now(),
        }
    }
}
