//! Notification entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub customer_id: i32,
    pub vehicle_id: i32,

    #[sea_orm(nullable)]
    pub service_reminder_id: Option<i32>,

    pub title: String,
    pub message: String,

    /// Priority: Critical, High, Medium
    pub priority: String,
    pub color: String,

    // Denormalized display fields
    pub customer_name: String,
    pub vehicle_display: String,
    pub service_name: String,

    #[sea_orm(nullable)]
    pub due_date: Option<Date>,

    pub is_read: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
