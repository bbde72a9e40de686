//! Daily appointment capacity per (service center, date)

pub mod model;
pub mod repository;

pub use model::DailyUsage;
pub use repository::DailyLimitRepository;
