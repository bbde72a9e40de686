//! Create service centers and their closure calendar

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceCenters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceCenters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceCenters::Name).string().not_null())
                    .col(
                        ColumnDef::new(ServiceCenters::Status)
                            .string()
                            .not_null()
                            .default("Active"),
                    )
                    .col(ColumnDef::new(ServiceCenters::Latitude).double())
                    .col(ColumnDef::new(ServiceCenters::Longitude).double())
                    .col(ColumnDef::new(ServiceCenters::DefaultDailyLimit).integer())
                    .col(
                        ColumnDef::new(ServiceCenters::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceCenterClosures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceCenterClosures::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ServiceCenterClosures::ServiceCenterId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceCenterClosures::ClosedOn)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ServiceCenterClosures::Reason).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_closures_service_center")
                            .from(ServiceCenterClosures::Table, ServiceCenterClosures::ServiceCenterId)
                            .to(ServiceCenters::Table, ServiceCenters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_closures_center_date")
                    .table(ServiceCenterClosures::Table)
                    .col(ServiceCenterClosures::ServiceCenterId)
                    .col(ServiceCenterClosures::ClosedOn)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceCenterClosures::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceCenters::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ServiceCenters {
    Table,
    Id,
    Name,
    Status,
    Latitude,
    Longitude,
    DefaultDailyLimit,
    CreatedAt,
}

#[derive(Iden)]
pub enum ServiceCenterClosures {
    Table,
    Id,
    ServiceCenterId,
    ClosedOn,
    Reason,
}
