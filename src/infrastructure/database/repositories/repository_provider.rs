//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::appointment::AppointmentRepository;
use crate::domain::catalog::CatalogRepository;
use crate::domain::customer::CustomerRepository;
use crate::domain::daily_limit::DailyLimitRepository;
use crate::domain::notification::{NotificationRepository, ReminderRepository};
use crate::domain::payment::PaymentRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::service_center::ServiceCenterRepository;
use crate::domain::service_history::ServiceHistoryRepository;
use crate::domain::transfer::TransferRepository;
use crate::domain::vehicle::VehicleRepository;

use super::appointment_repository::SeaOrmAppointmentRepository;
use super::catalog_repository::SeaOrmCatalogRepository;
use super::customer_repository::SeaOrmCustomerRepository;
use super::daily_limit_repository::SeaOrmDailyLimitRepository;
use super::notification_repository::{SeaOrmNotificationRepository, SeaOrmReminderRepository};
use super::payment_repository::SeaOrmPaymentRepository;
use super::service_center_repository::SeaOrmServiceCenterRepository;
use super::service_history_repository::SeaOrmServiceHistoryRepository;
use super::transfer_repository::SeaOrmTransferRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let vehicle = repos.vehicles().find_by_id(12).await?;
/// let usage = repos.daily_limits().find(3, date).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    customers: SeaOrmCustomerRepository,
    vehicles: SeaOrmVehicleRepository,
    service_centers: SeaOrmServiceCenterRepository,
    catalog: SeaOrmCatalogRepository,
    daily_limits: SeaOrmDailyLimitRepository,
    appointments: SeaOrmAppointmentRepository,
    payments: SeaOrmPaymentRepository,
    reminders: SeaOrmReminderRepository,
    notifications: SeaOrmNotificationRepository,
    transfers: SeaOrmTransferRepository,
    service_history: SeaOrmServiceHistoryRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            customers: SeaOrmCustomerRepository::new(db.clone()),
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            service_centers: SeaOrmServiceCenterRepository::new(db.clone()),
            catalog: SeaOrmCatalogRepository::new(db.clone()),
            daily_limits: SeaOrmDailyLimitRepository::new(db.clone()),
            appointments: SeaOrmAppointmentRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db.clone()),
            reminders: SeaOrmReminderRepository::new(db.clone()),
            notifications: SeaOrmNotificationRepository::new(db.clone()),
            transfers: SeaOrmTransferRepository::new(db.clone()),
            service_history: SeaOrmServiceHistoryRepository::new(db.clone()),
            db,
        }
    }

    /// Underlying pool, used by health checks
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn customers(&self) -> &dyn CustomerRepository {
        &self.customers
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn service_centers(&self) -> &dyn ServiceCenterRepository {
        &self.service_centers
    }

    fn catalog(&self) -> &dyn CatalogRepository {
        &self.catalog
    }

    fn daily_limits(&self) -> &dyn DailyLimitRepository {
        &self.daily_limits
    }

    fn appointments(&self) -> &dyn AppointmentRepository {
        &self.appointments
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }

    fn reminders(&self) -> &dyn ReminderRepository {
        &self.reminders
    }

    fn notifications(&self) -> &dyn NotificationRepository {
        &self.notifications
    }

    fn transfers(&self) -> &dyn TransferRepository {
        &self.transfers
    }

    fn service_history(&self) -> &dyn ServiceHistoryRepository {
        &self.service_history
    }
}
