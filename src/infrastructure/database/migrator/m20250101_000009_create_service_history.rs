//! Create per-vehicle service history

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_customers_and_vehicles::Vehicles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VehicleServiceHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VehicleServiceHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VehicleServiceHistory::VehicleId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VehicleServiceHistory::ServiceId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VehicleServiceHistory::ServiceCenterId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VehicleServiceHistory::AppointmentId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VehicleServiceHistory::ServiceDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VehicleServiceHistory::Cost)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VehicleServiceHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_history_vehicle")
                            .from(VehicleServiceHistory::Table, VehicleServiceHistory::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_service_history_vehicle")
                    .table(VehicleServiceHistory::Table)
                    .col(VehicleServiceHistory::VehicleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VehicleServiceHistory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum VehicleServiceHistory {
    Table,
    Id,
    VehicleId,
    ServiceId,
    ServiceCenterId,
    AppointmentId,
    ServiceDate,
    Cost,
    CreatedAt,
}
