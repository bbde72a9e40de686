//! Database entities module

pub mod appointment;
pub mod appointment_service;
pub mod customer;
pub mod daily_limit;
pub mod notification;
pub mod package;
pub mod package_service;
pub mod payment_log;
pub mod service;
pub mod service_center;
pub mod service_center_closure;
pub mod service_center_service;
pub mod service_history;
pub mod service_reminder;
pub mod vehicle;
pub mod vehicle_transfer;

pub use appointment::Entity as Appointment;
pub use appointment_service::Entity as AppointmentService;
pub use customer::Entity as Customer;
pub use daily_limit::Entity as DailyLimit;
pub use notification::Entity as Notification;
pub use package::Entity as Package;
pub use package_service::Entity as PackageService;
pub use payment_log::Entity as PaymentLog;
pub use service::Entity as Service;
pub use service_center::Entity as ServiceCenter;
pub use service_center_closure::Entity as ServiceCenterClosure;
pub use service_center_service::Entity as ServiceCenterService;
pub use service_history::Entity as ServiceHistory;
pub use service_reminder::Entity as ServiceReminder;
pub use vehicle::Entity as Vehicle;
pub use vehicle_transfer::Entity as VehicleTransfer;
