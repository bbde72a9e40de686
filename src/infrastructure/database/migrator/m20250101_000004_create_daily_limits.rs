//! Create per-date capacity counters for service centers
//!
//! The unique (service_center_id, limit_date) index is what makes lazy row
//! creation race-free.

use sea_orm_migration::prelude::*;

use super::m20250101_000002_create_service_centers::ServiceCenters;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceCenterDailyLimits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceCenterDailyLimits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ServiceCenterDailyLimits::ServiceCenterId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceCenterDailyLimits::LimitDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceCenterDailyLimits::CurrentAppointments)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ServiceCenterDailyLimits::MaxAppointments)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceCenterDailyLimits::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_limits_service_center")
                            .from(
                                ServiceCenterDailyLimits::Table,
                                ServiceCenterDailyLimits::ServiceCenterId,
                            )
                            .to(ServiceCenters::Table, ServiceCenters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_daily_limits_center_date")
                    .table(ServiceCenterDailyLimits::Table)
                    .col(ServiceCenterDailyLimits::ServiceCenterId)
                    .col(ServiceCenterDailyLimits::LimitDate)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceCenterDailyLimits::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ServiceCenterDailyLimits {
    Table,
    Id,
    ServiceCenterId,
    LimitDate,
    CurrentAppointments,
    MaxAppointments,
    UpdatedAt,
}
