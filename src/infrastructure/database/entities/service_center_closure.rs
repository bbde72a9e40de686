//! ServiceCenterClosure entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "service_center_closures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub service_center_id: i32,
    pub closed_on: Date,

    #[sea_orm(nullable)]
    pub reason: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
