//! Appointment pricing and loyalty helpers
//!
//! Pure functions over catalog data; the booking workflow loads the inputs.
//! Amounts are in the smallest currency unit.

use crate::domain::{AppointmentLine, CenterOffering, DomainError, DomainResult, Package, Service};

/// Priced preview of a booking
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub lines: Vec<AppointmentLine>,
    pub subtotal: i64,
    pub discount: i64,
    pub total: i64,
    pub package_id: Option<i32>,
    pub package_name: Option<String>,
    /// Credited on completion, not at booking time
    pub loyalty_points: i32,
}

/// Price each requested service at the center, in request order.
///
/// The center's custom price wins over the catalog base price. A service
/// that is missing from the catalog, inactive, or not offered (or not
/// available) at the center rejects the booking.
pub fn price_lines(
    service_ids: &[i32],
    services: &[Service],
    offerings: &[CenterOffering],
) -> DomainResult<Vec<AppointmentLine>> {
    service_ids
        .iter()
        .map(|id| {
            let service = services
                .iter()
                .find(|s| s.id == *id && s.is_active)
                .ok_or_else(|| {
                    DomainError::BookingRejected(format!("Service {} is not available", id))
                })?;

            let offering = offerings
                .iter()
                .find(|o| o.service_id == *id && o.is_available)
                .ok_or_else(|| {
                    DomainError::BookingRejected(format!(
                        "Service '{}' is not offered at this service center",
                        service.name
                    ))
                })?;

            Ok(AppointmentLine {
                service_id: service.id,
                service_name: service.name.clone(),
                price: offering.custom_price.unwrap_or(service.base_price),
            })
        })
        .collect()
}

/// Active package covering every requested service; the largest discount
/// wins when several qualify
pub fn applicable_package<'a>(packages: &'a [Package], service_ids: &[i32]) -> Option<&'a Package> {
    packages
        .iter()
        .filter(|p| p.is_active && p.covers(service_ids))
        .max_by_key(|p| (p.discount_percent, -p.id))
}

/// Percentage of `subtotal`, rounded half up
pub fn discount_amount(subtotal: i64, percent: i32) -> i64 {
    let percent = percent.clamp(0, 100) as i64;
    (subtotal * percent + 50) / 100
}

/// Sum of per-service loyalty points
pub fn loyalty_points(service_ids: &[i32], services: &[Service]) -> i32 {
    service_ids
        .iter()
        .filter_map(|id| services.iter().find(|s| s.id == *id))
        .map(|s| s.loyalty_points.max(0))
        .sum()
}

pub fn build_quote(
    service_ids: &[i32],
    services: &[Service],
    offerings: &[CenterOffering],
    packages: &[Package],
) -> DomainResult<Quote> {
    let lines = price_lines(service_ids, services, offerings)?;
    let subtotal: i64 = lines.iter().map(|l| l.price).sum();

    let package = applicable_package(packages, service_ids);
    let discount = package
        .map(|p| discount_amount(subtotal, p.discount_percent))
        .unwrap_or(0);

    Ok(Quote {
        lines,
        subtotal,
        discount,
        total: subtotal - discount,
        package_id: package.map(|p| p.id),
        package_name: package.map(|p| p.name.clone()),
        loyalty_points: loyalty_points(service_ids, services),
    })
}
