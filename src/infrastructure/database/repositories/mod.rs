//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod appointment_repository;
pub mod catalog_repository;
pub mod customer_repository;
pub mod daily_limit_repository;
pub mod notification_repository;
pub mod payment_repository;
pub mod repository_provider;
pub mod service_center_repository;
pub mod service_history_repository;
pub mod transfer_repository;
pub mod vehicle_repository;

mod slots;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// Map a SeaORM error onto the domain taxonomy.
///
/// Unique-key violations mean a second row appeared where the schema allows
/// one, which callers treat as a defect. Everything else is storage trouble.
pub(crate) fn db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            DomainError::InvariantViolation(format!("Unique constraint violated: {}", msg))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            DomainError::Validation(format!("Referenced record does not exist: {}", msg))
        }
        _ => DomainError::Storage(e.to_string()),
    }
}
