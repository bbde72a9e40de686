//! PaymentLog entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub appointment_id: i32,
    pub amount: i64,

    /// Method: Cash, Card, BankTransfer, Wallet
    pub method: String,
    /// Type: Advance, Final
    pub payment_type: String,
    /// Status: Pending, Success, Failed
    pub status: String,

    #[sea_orm(nullable)]
    pub transaction_reference: Option<String>,

    #[sea_orm(nullable)]
    pub failure_reason: Option<String>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::appointment::Entity",
        from = "Column::AppointmentId",
        to = "super::appointment::Column::Id"
    )]
    Appointment,
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
