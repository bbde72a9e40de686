//! Customer repository interface

use async_trait::async_trait;

use super::model::Customer;
use crate::domain::DomainResult;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a customer and return it with its assigned ID
    async fn save(&self, customer: Customer) -> DomainResult<Customer>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>>;
}
