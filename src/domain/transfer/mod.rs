//! Vehicle ownership transfer requests

pub mod model;
pub mod repository;

pub use model::{TransferStatus, VehicleTransfer};
pub use repository::TransferRepository;
