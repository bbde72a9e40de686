//! ServiceCenter entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "service_centers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Status: Active, Inactive
    pub status: String,

    #[sea_orm(nullable)]
    pub latitude: Option<f64>,

    #[sea_orm(nullable)]
    pub longitude: Option<f64>,

    #[sea_orm(nullable)]
    pub default_daily_limit: Option<i32>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::service_center_service::Entity")]
    Offerings,
    #[sea_orm(has_many = "super::daily_limit::Entity")]
    DailyLimits,
}

impl Related<super::service_center_service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offerings.def()
    }
}

impl Related<super::daily_limit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyLimits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
