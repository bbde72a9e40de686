//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` : unified access to all per-aggregate repositories
//! - `DomainResult` : standard result type for domain operations

use super::appointment::AppointmentRepository;
use super::catalog::CatalogRepository;
use super::customer::CustomerRepository;
use super::daily_limit::DailyLimitRepository;
use super::notification::{NotificationRepository, ReminderRepository};
use super::payment::PaymentRepository;
use super::service_center::ServiceCenterRepository;
use super::service_history::ServiceHistoryRepository;
use super::transfer::TransferRepository;
use super::vehicle::VehicleRepository;
use crate::shared::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let vehicle = repos.vehicles().find_by_id(12).await?;
///     let usage = repos.daily_limits().find(3, date).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn customers(&self) -> &dyn CustomerRepository;
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn service_centers(&self) -> &dyn ServiceCenterRepository;
    fn catalog(&self) -> &dyn CatalogRepository;
    fn daily_limits(&self) -> &dyn DailyLimitRepository;
    fn appointments(&self) -> &dyn AppointmentRepository;
    fn payments(&self) -> &dyn PaymentRepository;
    fn reminders(&self) -> &dyn ReminderRepository;
    fn notifications(&self) -> &dyn NotificationRepository;
    fn transfers(&self) -> &dyn TransferRepository;
    fn service_history(&self) -> &dyn ServiceHistoryRepository;
}
