//! Payment ledger

pub mod model;
pub mod repository;

pub use model::{PaymentLog, PaymentMethod, PaymentStatus, PaymentType};
pub use repository::{PaymentRepository, Settlement};
