pub mod appointments;
pub mod health;
pub mod metrics;
pub mod notifications;
pub mod payments;
pub mod request_id;
pub mod service_centers;
pub mod transfers;
