//! ServiceCenterService entity (center-specific offering)
//!
//! Unique on (service_id, service_center_id).

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "service_center_services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub service_center_id: i32,
    pub service_id: i32,

    #[sea_orm(nullable)]
    pub custom_price: Option<i64>,

    pub is_available: bool,
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
