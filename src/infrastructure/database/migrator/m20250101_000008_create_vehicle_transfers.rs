//! Create vehicle ownership transfer requests

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
                    .table(VehicleTransfers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VehicleTransfers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VehicleTransfers::VehicleId).integer().not_null())
                    .col(
                        ColumnDef::new(VehicleTransfers::FromCustomerId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VehicleTransfers::ToCustomerId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VehicleTransfers::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(VehicleTransfers::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VehicleTransfers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VehicleTransfers::ResolvedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transfers_vehicle")
                            .from(VehicleTransfers::Table, VehicleTransfers::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transfers_status_expiry")
                    .table(VehicleTransfers::Table)
                    .col(VehicleTransfers::Status)
                    .col(VehicleTransfers::ExpiresAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VehicleTransfers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum VehicleTransfers {
    Table,
    Id,
    VehicleId,
    FromCustomerId,
    ToCustomerId,
    Status,
    ExpiresAt,
    CreatedAt,
    ResolvedAt,
}
