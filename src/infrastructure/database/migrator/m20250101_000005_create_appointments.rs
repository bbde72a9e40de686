//! Create appointments and their service lines

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_customers_and_vehicles::{Customers, Vehicles};
use super::m20250101_000002_create_service_centers::ServiceCenters;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Appointments::CustomerId).integer().not_null())
                    .col(ColumnDef::new(Appointments::VehicleId).integer().not_null())
                    .col(
                        ColumnDef::new(Appointments::ServiceCenterId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Appointments::AppointmentDate).date().not_null())
                    .col(
                        ColumnDef::new(Appointments::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(Appointments::EstimatedTotalCost)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Appointments::ActualTotalCost).big_integer())
                    .col(
                        ColumnDef::new(Appointments::DiscountAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Appointments::PackageId).integer())
                    .col(
                        ColumnDef::new(Appointments::LoyaltyPoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Appointments::IsAdvancePaymentCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Appointments::IsFullyPaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Appointments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_customer")
                            .from(Appointments::Table, Appointments::CustomerId)
                            .to(Customers::Table, Customers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_vehicle")
                            .from(Appointments::Table, Appointments::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_service_center")
                            .from(Appointments::Table, Appointments::ServiceCenterId)
                            .to(ServiceCenters::Table, ServiceCenters::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_customer")
                    .table(Appointments::Table)
                    .col(Appointments::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_center_date")
                    .table(Appointments::Table)
                    .col(Appointments::ServiceCenterId)
                    .col(Appointments::AppointmentDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AppointmentServices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppointmentServices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AppointmentServices::AppointmentId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointmentServices::ServiceId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointmentServices::ServiceName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointmentServices::Price)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_services_appointment")
                            .from(AppointmentServices::Table, AppointmentServices::AppointmentId)
                            .to(Appointments::Table, Appointments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppointmentServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Appointments {
    Table,
    Id,
    CustomerId,
    VehicleId,
    ServiceCenterId,
    AppointmentDate,
    Status,
    EstimatedTotalCost,
    ActualTotalCost,
    DiscountAmount,
    PackageId,
    LoyaltyPoints,
    IsAdvancePaymentCompleted,
    IsFullyPaid,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum AppointmentServices {
    Table,
    Id,
    AppointmentId,
    ServiceId,
    ServiceName,
    Price,
}
