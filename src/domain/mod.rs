//! Domain layer: plain records with explicit foreign keys, closed status
//! enumerations and per-aggregate repository interfaces.

pub mod appointment;
pub mod catalog;
pub mod customer;
pub mod daily_limit;
pub mod notification;
pub mod payment;
pub mod repositories;
pub mod service_center;
pub mod service_history;
pub mod transfer;
pub mod vehicle;

pub use appointment::{Appointment, AppointmentLine, AppointmentStatus, NewAppointment};
pub use catalog::{Package, Service};
pub use customer::Customer;
pub use daily_limit::DailyUsage;
pub use notification::{Notification, NotificationPriority, ServiceReminder};
pub use payment::{PaymentLog, PaymentMethod, PaymentStatus, PaymentType};
pub use repositories::{DomainResult, RepositoryProvider};
pub use service_center::{CenterClosure, CenterOffering, ServiceCenter, ServiceCenterStatus};
pub use service_history::ServiceHistoryEntry;
pub use transfer::{TransferStatus, VehicleTransfer};
pub use vehicle::Vehicle;

pub use crate::shared::DomainError;
