//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_customers_and_vehicles;
mod m20250101_000002_create_service_centers;
mod m20250101_000003_create_catalog;
mod m20250101_000004_create_daily_limits;
mod m20250101_000005_create_appointments;
mod m20250101_000006_create_payment_logs;
mod m20250101_000007_create_reminders_and_notifications;
mod m20250101_000008_create_vehicle_transfers;
mod m20250101_000009_create_service_history;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_customers_and_vehicles::Migration),
            Box::new(m20250101_000002_create_service_centers::Migration),
            Box::new(m20250101_000003_create_catalog::Migration),
            Box::new(m20250101_000004_create_daily_limits::Migration),
            Box::new(m20250101_000005_create_appointments::Migration),
            Box::new(m20250101_000006_create_payment_logs::Migration),
            Box::new(m20250101_000007_create_reminders_and_notifications::Migration),
            Box::new(m20250101_000008_create_vehicle_transfers::Migration),
            Box::new(m20250101_000009_create_service_history::Migration),
        ]
    }
}
