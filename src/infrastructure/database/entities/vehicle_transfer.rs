//! VehicleTransfer entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicle_transfers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub vehicle_id: i32,
    pub from_customer_id: i32,
    pub to_customer_id: i32,

    /// Status: Pending, Accepted, Rejected, Expired
    pub status: String,

    pub expires_at: DateTimeUtc,
    pub created_at: DateTimeUtc,

    #[sea_orm(nullable)]
    pub resolved_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
