//! Service center aggregate
//!
//! A service center, the services it offers (with center-specific pricing),
//! and its closure calendar.

pub mod model;
pub mod repository;

pub use model::{CenterClosure, CenterOffering, ServiceCenter, ServiceCenterStatus};
pub use repository::ServiceCenterRepository;
