//! Catalog repository interface

use async_trait::async_trait;

use super::model::{Package, Service};
use crate::domain::DomainResult;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn save_service(&self, service: Service) -> DomainResult<Service>;
    async fn find_service(&self, id: i32) -> DomainResult<Option<Service>>;
    async fn find_services(&self, ids: &[i32]) -> DomainResult<Vec<Service>>;

    /// Insert a package together with its service membership
    async fn save_package(&self, package: Package) -> DomainResult<Package>;

    /// All active packages with their member service IDs
    async fn find_active_packages(&self) -> DomainResult<Vec<Package>>;
}
