//! Shared fixtures for database-backed tests
//!
//! Every call gets its own migrated in-memory SQLite database, except
//! `FileDb`, which backs a multi-connection pool with a temporary file.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use crate::domain::{
    CenterOffering, Customer, RepositoryProvider, Service, ServiceCenter, Vehicle,
};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub async fn test_db() -> DatabaseConnection {
    let db = init_database(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

pub async fn test_repos() -> Arc<dyn RepositoryProvider> {
    Arc::new(SeaOrmRepositoryProvider::new(test_db().await))
}

/// Migrated SQLite file with a multi-connection pool; removed on drop
pub struct FileDb {
    pub repos: Arc<dyn RepositoryProvider>,
    path: PathBuf,
}

impl FileDb {
    pub async fn new(max_connections: u32) -> Self {
        let path = std::env::temp_dir().join(format!("garage-test-{}.db", uuid::Uuid::new_v4()));
        let mut config = DatabaseConfig::sqlite(&path.to_string_lossy());
        config.max_connections = max_connections;

        let db = init_database(&config).await.expect("file database");
        Migrator::up(&db, None).await.expect("migrations");
        Self {
            repos: Arc::new(SeaOrmRepositoryProvider::new(db)),
            path,
        }
    }
}

impl Drop for FileDb {
    fn drop(&mut self) {
        for suffix in ["", "-journal", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub fn future_date(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

pub async fn seed_customer(repos: &dyn RepositoryProvider, name: &str, email: &str) -> Customer {
    repos
        .customers()
        .save(Customer::new(name, email))
        .await
        .expect("seed customer")
}

pub async fn seed_vehicle(
    repos: &dyn RepositoryProvider,
    customer_id: i32,
    registration: &str,
) -> Vehicle {
    repos
        .vehicles()
        .save(Vehicle::new(customer_id, registration, "Toyota", "Corolla"))
        .await
        .expect("seed vehicle")
}

pub async fn seed_center(
    repos: &dyn RepositoryProvider,
    name: &str,
    daily_limit: Option<i32>,
) -> ServiceCenter {
    let mut center = ServiceCenter::new(name);
    center.default_daily_limit = daily_limit;
    repos
        .service_centers()
        .save(center)
        .await
        .expect("seed center")
}

pub async fn seed_service(
    repos: &dyn RepositoryProvider,
    name: &str,
    base_price: i64,
    loyalty_points: i32,
) -> Service {
    repos
        .catalog()
        .save_service(Service::new(name, base_price, loyalty_points))
        .await
        .expect("seed service")
}

pub async fn seed_offering(
    repos: &dyn RepositoryProvider,
    center_id: i32,
    service_id: i32,
    custom_price: Option<i64>,
) -> CenterOffering {
    repos
        .service_centers()
        .save_offering(CenterOffering::new(center_id, service_id, custom_price))
        .await
        .expect("seed offering")
}

/// One customer with one vehicle, and a center offering two services
pub struct Fixture {
    pub repos: Arc<dyn RepositoryProvider>,
    pub db: DatabaseConnection,
    pub customer: Customer,
    pub vehicle: Vehicle,
    pub center: ServiceCenter,
    /// Base 5000, 4500 at the center, 10 points
    pub oil_change: Service,
    /// Base 3000, no custom price, 5 points
    pub brake_check: Service,
    /// In the catalog but not offered at the center
    pub unlisted: Service,
}

pub async fn fixture() -> Fixture {
    fixture_with_limit(None).await
}

pub async fn fixture_with_limit(daily_limit: Option<i32>) -> Fixture {
    let db = test_db().await;
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    let customer = seed_customer(&*repos, "Asha Verma", "asha@example.com").await;
    let vehicle = seed_vehicle(&*repos, customer.id, "KA-01-1234").await;
    let center = seed_center(&*repos, "Highway Auto Center", daily_limit).await;

    let oil_change = seed_service(&*repos, "Oil change", 5000, 10).await;
    let brake_check = seed_service(&*repos, "Brake check", 3000, 5).await;
    let unlisted = seed_service(&*repos, "Paint job", 90000, 50).await;

    seed_offering(&*repos, center.id, oil_change.id, Some(4500)).await;
    seed_offering(&*repos, center.id, brake_check.id, None).await;

    Fixture {
        repos,
        db,
        customer,
        vehicle,
        center,
        oil_change,
        brake_check,
        unlisted,
    }
}
