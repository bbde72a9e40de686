//! Catalog domain entities

/// Catalog entry for a maintenance service
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub id: i32,
    pub name: String,
    /// Price in the smallest currency unit, used when a center sets no custom price
    pub base_price: i64,
    /// Loyalty points awarded when an appointment containing it completes
    pub loyalty_points: i32,
    pub is_active: bool,
}

impl Service {
    pub fn new(name: impl Into<String>, base_price: i64, loyalty_points: i32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            base_price,
            loyalty_points,
            is_active: true,
        }
    }
}

/// Named discount applicable when every selected service belongs to it
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub id: i32,
    pub name: String,
    /// Whole percent, 0..=100
    pub discount_percent: i32,
    pub is_active: bool,
    pub service_ids: Vec<i32>,
}

impl Package {
    pub fn new(name: impl Into<String>, discount_percent: i32, service_ids: Vec<i32>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            discount_percent,
            is_active: true,
            service_ids,
        }
    }

    /// True when every id in `service_ids` is part of this package
    pub fn covers(&self, service_ids: &[i32]) -> bool {
        !service_ids.is_empty() && service_ids.iter().all(|id| self.service_ids.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_covers_subset_only() {
        let p = Package::new("Basic care", 10, vec![1, 2, 3]);
        assert!(p.covers(&[1, 3]));
        assert!(!p.covers(&[1, 4]));
        assert!(!p.covers(&[]));
    }
}
