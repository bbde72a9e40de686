//! Create service reminders and generated notifications

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_customers_and_vehicles::Vehicles;
use super::m20250101_000003_create_catalog::Services;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceReminders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceReminders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceReminders::VehicleId).integer().not_null())
                    .col(ColumnDef::new(ServiceReminders::ServiceId).integer().not_null())
                    .col(ColumnDef::new(ServiceReminders::ReminderDate).date().not_null())
                    .col(
                        ColumnDef::new(ServiceReminders::NotifyBeforeDays)
                            .integer()
                            .not_null()
                            .default(7),
                    )
                    .col(
                        ColumnDef::new(ServiceReminders::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(ServiceReminders::Note).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reminders_vehicle")
                            .from(ServiceReminders::Table, ServiceReminders::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reminders_service")
                            .from(ServiceReminders::Table, ServiceReminders::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reminders_active_date")
                    .table(ServiceReminders::Table)
                    .col(ServiceReminders::IsActive)
                    .col(ServiceReminders::ReminderDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::CustomerId).integer().not_null())
                    .col(ColumnDef::new(Notifications::VehicleId).integer().not_null())
                    .col(ColumnDef::new(Notifications::ServiceReminderId).integer())
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(ColumnDef::new(Notifications::Priority).string().not_null())
                    .col(ColumnDef::new(Notifications::Color).string().not_null())
                    .col(ColumnDef::new(Notifications::CustomerName).string().not_null())
                    .col(ColumnDef::new(Notifications::VehicleDisplay).string().not_null())
                    .col(ColumnDef::new(Notifications::ServiceName).string().not_null())
                    .col(ColumnDef::new(Notifications::DueDate).date())
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Dedup lookup: latest notification per reminder
        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_reminder_created")
                    .table(Notifications::Table)
                    .col(Notifications::ServiceReminderId)
                    .col(Notifications::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_customer")
                    .table(Notifications::Table)
                    .col(Notifications::CustomerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceReminders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ServiceReminders {
    Table,
    Id,
    VehicleId,
    ServiceId,
    ReminderDate,
    NotifyBeforeDays,
    IsActive,
    Note,
}

#[derive(Iden)]
pub enum Notifications {
    Table,
    Id,
    CustomerId,
    VehicleId,
    ServiceReminderId,
    Title,
    Message,
    Priority,
    Color,
    CustomerName,
    VehicleDisplay,
    ServiceName,
    DueDate,
    IsRead,
    CreatedAt,
}
