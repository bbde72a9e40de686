//! Appointment booking, lifecycle and per-customer listing

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
