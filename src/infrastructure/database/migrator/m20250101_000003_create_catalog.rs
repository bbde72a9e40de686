//! Create the service catalog: services, center offerings, packages

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
                    .table(Services::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Services::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Services::Name).string().not_null())
                    .col(ColumnDef::new(Services::BasePrice).big_integer().not_null())
                    .col(
                        ColumnDef::new(Services::LoyaltyPoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Services::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceCenterServices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceCenterServices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ServiceCenterServices::ServiceCenterId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceCenterServices::ServiceId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ServiceCenterServices::CustomPrice).big_integer())
                    .col(
                        ColumnDef::new(ServiceCenterServices::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offerings_service_center")
                            .from(ServiceCenterServices::Table, ServiceCenterServices::ServiceCenterId)
                            .to(ServiceCenters::Table, ServiceCenters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offerings_service")
                            .from(ServiceCenterServices::Table, ServiceCenterServices::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one offering per (service, center)
        manager
            .create_index(
                Index::create()
                    .name("uq_offerings_service_center")
                    .table(ServiceCenterServices::Table)
                    .col(ServiceCenterServices::ServiceId)
                    .col(ServiceCenterServices::ServiceCenterId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Packages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Packages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Packages::Name).string().not_null())
                    .col(
                        ColumnDef::new(Packages::DiscountPercent)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Packages::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PackageServices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PackageServices::PackageId).integer().not_null())
                    .col(ColumnDef::new(PackageServices::ServiceId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(PackageServices::PackageId)
                            .col(PackageServices::ServiceId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_package_services_package")
                            .from(PackageServices::Table, PackageServices::PackageId)
                            .to(Packages::Table, Packages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_package_services_service")
                            .from(PackageServices::Table, PackageServices::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PackageServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Packages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceCenterServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Services {
    Table,
    Id,
    Name,
    BasePrice,
    LoyaltyPoints,
    IsActive,
}

#[derive(Iden)]
pub enum ServiceCenterServices {
    Table,
    Id,
    ServiceCenterId,
    ServiceId,
    CustomPrice,
    IsAvailable,
}

#[derive(Iden)]
pub enum Packages {
    Table,
    Id,
    Name,
    DiscountPercent,
    IsActive,
}

#[derive(Iden)]
pub enum PackageServices {
    Table,
    PackageId,
    ServiceId,
}
