//! # Garage Service
//!
//! Backend for vehicle service centers: appointment booking against a
//! per-center daily capacity, advance and final payments, loyalty and
//! package pricing, service-reminder notifications and vehicle ownership
//! transfers.
//!
//! ## Architecture
//!
//! - **domain**: records, status enums and repository traits
//! - **application**: workflow services and background tasks
//! - **infrastructure**: SeaORM entities, migrations and repositories
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: error taxonomy, pagination, shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use interfaces::{create_api_router, AppState};
