//! Appointment entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub customer_id: i32,
    pub vehicle_id: i32,
    pub service_center_id: i32,
    pub appointment_date: Date,

    /// Status: Pending, Confirmed, Completed, Cancelled
    pub status: String,

    pub estimated_total_cost: i64,

    #[sea_orm(nullable)]
    pub actual_total_cost: Option<i64>,

    pub discount_amount: i64,

    #[sea_orm(nullable)]
    pub package_id: Option<i32>,

    pub loyalty_points: i32,
    pub is_advance_payment_completed: bool,
    pub is_fully_paid: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::appointment_service::Entity")]
    Lines,
    #[sea_orm(has_many = "super::payment_log::Entity")]
    Payments,
}

impl Related<super::appointment_service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl Related<super::payment_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
