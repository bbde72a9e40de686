//! Service catalog: services and discount packages

pub mod model;
pub mod repository;

pub use model::{Package, Service};
pub use repository::CatalogRepository;
