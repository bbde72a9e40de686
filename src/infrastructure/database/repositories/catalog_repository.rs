//! SeaORM implementation of CatalogRepository

use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::db_err;
use crate::domain::catalog::{CatalogRepository, Package, Service};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{package, package_service, service};

pub struct SeaOrmCatalogRepository {
    db: DatabaseConnection,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn service_to_domain(m: service::Model) -> Service {
    Service {
        id: m.id,
        name: m.name,
        base_price: m.base_price,
        loyalty_points: m.loyalty_points,
        is_active: m.is_active,
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn save_service(&self, s: Service) -> DomainResult<Service> {
        debug!("Saving service: {}", s.name);

        let model = service::ActiveModel {
            id: NotSet,
            name: Set(s.name),
            base_price: Set(s.base_price),
            loyalty_points: Set(s.loyalty_points),
            is_active: Set(s.is_active),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(service_to_domain(saved))
    }

    async fn find_service(&self, id: i32) -> DomainResult<Option<Service>> {
        let model = service::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(service_to_domain))
    }

    async fn find_services(&self, ids: &[i32]) -> DomainResult<Vec<Service>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = service::Entity::find()
            .filter(service::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(service::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(service_to_domain).collect())
    }

    async fn save_package(&self, p: Package) -> DomainResult<Package> {
        debug!("Saving package: {} ({}%)", p.name, p.discount_percent);

        let txn = self.db.begin().await.map_err(db_err)?;

        let saved = package::ActiveModel {
            id: NotSet,
            name: Set(p.name),
            discount_percent: Set(p.discount_percent),
            is_active: Set(p.is_active),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        for service_id in &p.service_ids {
            package_service::ActiveModel {
                package_id: Set(saved.id),
                service_id: Set(*service_id),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        Ok(Package {
            id: saved.id,
            name: saved.name,
            discount_percent: saved.discount_percent,
            is_active: saved.is_active,
            service_ids: p.service_ids,
        })
    }

    async fn find_active_packages(&self) -> DomainResult<Vec<Package>> {
        let packages = package::Entity::find()
            .filter(package::Column::IsActive.eq(true))
            .order_by_asc(package::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        if packages.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = packages.iter().map(|p| p.id).collect();
        let members = package_service::Entity::find()
            .filter(package_service::Column::PackageId.is_in(ids))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut by_package: HashMap<i32, Vec<i32>> = HashMap::new();
        for m in members {
            by_package.entry(m.package_id).or_default().push(m.service_id);
        }

        Ok(packages
            .into_iter()
            .map(|p| Package {
                service_ids: by_package.remove(&p.id).unwrap_or_default(),
                id: p.id,
                name: p.name,
                discount_percent: p.discount_percent,
                is_active: p.is_active,
            })
            .collect())
    }
}
