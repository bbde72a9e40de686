//! Per-vehicle record of completed services

pub mod model;
pub mod repository;

pub use model::ServiceHistoryEntry;
pub use repository::ServiceHistoryRepository;
