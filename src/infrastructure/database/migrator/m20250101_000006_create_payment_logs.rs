//! Create the append-only payment ledger

use sea_orm_migration::prelude::*;

use super::m20250101_000005_create_appointments::Appointments;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaymentLogs::AppointmentId).integer().not_null())
                    .col(ColumnDef::new(PaymentLogs::Amount).big_integer().not_null())
                    .col(ColumnDef::new(PaymentLogs::Method).string().not_null())
                    .col(ColumnDef::new(PaymentLogs::PaymentType).string().not_null())
                    .col(ColumnDef::new(PaymentLogs::Status).string().not_null())
                    .col(ColumnDef::new(PaymentLogs::TransactionReference).string())
                    .col(ColumnDef::new(PaymentLogs::FailureReason).string())
                    .col(
                        ColumnDef::new(PaymentLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_logs_appointment")
                            .from(PaymentLogs::Table, PaymentLogs::AppointmentId)
                            .to(Appointments::Table, Appointments::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_logs_appointment")
                    .table(PaymentLogs::Table)
                    .col(PaymentLogs::AppointmentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PaymentLogs {
    Table,
    Id,
    AppointmentId,
    Amount,
    Method,
    PaymentType,
    Status,
    TransactionReference,
    FailureReason,
    CreatedAt,
}
