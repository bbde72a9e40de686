//! Daily capacity of service centers

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
