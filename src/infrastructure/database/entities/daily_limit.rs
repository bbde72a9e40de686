//! ServiceCenterDailyLimit entity
//!
//! One row per (service_center_id, limit_date), enforced by a unique index.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "service_center_daily_limits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub service_center_id: i32,
    pub limit_date: Date,

    /// Appointments currently holding a slot
    pub current_appointments: i32,
    pub max_appointments: i32,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::service_center::Entity",
        from = "Column::ServiceCenterId",
        to = "super::service_center::Column::Id"
    )]
    ServiceCenter,
}

impl Related<super::service_center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceCenter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
