//! Appointment booking workflow
//!
//! Validates a request, prices it, and persists the appointment together
//! with its slot reservation. Cancellation gives the slot back.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{error, info, warn};

use super::pricing::{self, Quote};
use super::slot_allocator::SlotAllocator;
use crate::domain::appointment::CancelOutcome;
use crate::domain::{
    Appointment, AppointmentStatus, DomainError, DomainResult, NewAppointment,
    RepositoryProvider,
};
use crate::shared::{PaginatedResult, PaginationParams};

/// Incoming booking request
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub service_center_id: i32,
    pub date: NaiveDate,
    pub service_ids: Vec<i32>,
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    slots: Arc<SlotAllocator>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, slots: Arc<SlotAllocator>) -> Self {
        Self { repos, slots }
    }

    /// Price a request without booking it
    pub async fn quote(&self, request: &BookingRequest) -> DomainResult<Quote> {
        let service_ids = normalize_service_ids(&request.service_ids)?;
        self.validate(request, &service_ids).await?;
        self.price(request.service_center_id, &service_ids).await
    }

    pub async fn book(&self, request: BookingRequest) -> DomainResult<Appointment> {
        let result = self.try_book(&request).await;

        match &result {
            Ok(appointment) => {
                metrics::counter!("appointments_booked_total").increment(1);
                info!(
                    appointment_id = appointment.id,
                    service_center_id = appointment.service_center_id,
                    date = %appointment.appointment_date,
                    total = appointment.estimated_total_cost,
                    "Appointment booked"
                );
            }
            Err(e) => {
                metrics::counter!("appointments_rejected_total", "reason" => e.code())
                    .increment(1);
                if let DomainError::InvariantViolation(msg) = e {
                    error!(error = %msg, "Booking hit a data invariant violation");
                } else {
                    info!(
                        service_center_id = request.service_center_id,
                        date = %request.date,
                        reason = e.code(),
                        "Booking rejected: {}", e
                    );
                }
            }
        }

        result
    }

    async fn try_book(&self, request: &BookingRequest) -> DomainResult<Appointment> {
        let service_ids = normalize_service_ids(&request.service_ids)?;
        self.validate(request, &service_ids).await?;
        let quote = self.price(request.service_center_id, &service_ids).await?;
        let capacity = self.slots.default_capacity(request.service_center_id).await?;

        let draft = NewAppointment {
            customer_id: request.customer_id,
            vehicle_id: request.vehicle_id,
            service_center_id: request.service_center_id,
            appointment_date: request.date,
            estimated_total_cost: quote.total,
            discount_amount: quote.discount,
            package_id: quote.package_id,
            loyalty_points: quote.loyalty_points,
            lines: quote.lines,
        };

        self.repos
            .appointments()
            .create_with_slot(draft, capacity)
            .await
    }

    /// Booking rules, checked in order before anything is written
    async fn validate(&self, request: &BookingRequest, service_ids: &[i32]) -> DomainResult<()> {
        self.repos
            .customers()
            .find_by_id(request.customer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", "id", request.customer_id))?;

        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", "id", request.vehicle_id))?;

        if !vehicle.is_owned_by(request.customer_id) {
            return Err(DomainError::BookingRejected(format!(
                "Vehicle {} does not belong to customer {}",
                request.vehicle_id, request.customer_id
            )));
        }

        let center = self
            .repos
            .service_centers()
            .find_by_id(request.service_center_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("ServiceCenter", "id", request.service_center_id)
            })?;

        if !center.is_active() {
            return Err(DomainError::BookingRejected(format!(
                "Service center '{}' is not accepting appointments",
                center.name
            )));
        }

        let offerings = self
            .repos
            .service_centers()
            .find_offerings(center.id, service_ids)
            .await?;
        for id in service_ids {
            if !offerings.iter().any(|o| o.service_id == *id && o.is_available) {
                return Err(DomainError::BookingRejected(format!(
                    "Service {} is not available at '{}'",
                    id, center.name
                )));
            }
        }

        if request.date < Utc::now().date_naive() {
            return Err(DomainError::BookingRejected(format!(
                "Appointment date {} is in the past",
                request.date
            )));
        }

        if self
            .repos
            .service_centers()
            .is_closed_on(center.id, request.date)
            .await?
        {
            return Err(DomainError::BookingRejected(format!(
                "Service center '{}' is closed on {}",
                center.name, request.date
            )));
        }

        Ok(())
    }

    async fn price(&self, service_center_id: i32, service_ids: &[i32]) -> DomainResult<Quote> {
        let services = self.repos.catalog().find_services(service_ids).await?;
        let offerings = self
            .repos
            .service_centers()
            .find_offerings(service_center_id, service_ids)
            .await?;
        let packages = self.repos.catalog().find_active_packages().await?;

        pricing::build_quote(service_ids, &services, &offerings, &packages)
    }

    pub async fn get(&self, id: i32) -> DomainResult<Appointment> {
        self.repos
            .appointments()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Appointment", "id", id))
    }

    pub async fn list_for_customer(
        &self,
        customer_id: i32,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<Appointment>> {
        self.repos
            .customers()
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", "id", customer_id))?;

        self.repos
            .appointments()
            .find_for_customer(customer_id, pagination)
            .await
    }

    pub async fn confirm(&self, id: i32) -> DomainResult<Appointment> {
        let current = self.get(id).await?;
        self.transition(current, AppointmentStatus::Confirmed).await
    }

    /// Cancel and release the slot. Cancelling twice is not an error.
    pub async fn cancel(&self, id: i32) -> DomainResult<CancelOutcome> {
        let outcome = self.repos.appointments().cancel(id).await?;

        match &outcome {
            CancelOutcome::Cancelled(a) => {
                metrics::counter!("appointments_cancelled_total").increment(1);
                info!(
                    appointment_id = a.id,
                    service_center_id = a.service_center_id,
                    date = %a.appointment_date,
                    "Appointment cancelled, slot released"
                );
            }
            CancelOutcome::AlreadyCancelled(a) => {
                info!(appointment_id = a.id, "Appointment already cancelled");
            }
        }

        Ok(outcome)
    }

    async fn transition(
        &self,
        current: Appointment,
        next: AppointmentStatus,
    ) -> DomainResult<Appointment> {
        if !current.status.can_transition_to(next) {
            return Err(DomainError::Validation(format!(
                "Appointment {} cannot move from {} to {}",
                current.id, current.status, next
            )));
        }

        let changed = self
            .repos
            .appointments()
            .update_status_if(current.id, current.status, next)
            .await?;

        if !changed {
            warn!(
                appointment_id = current.id,
                "Status changed concurrently, transition to {} dropped", next
            );
            return Err(DomainError::Conflict(format!(
                "Appointment {} was modified concurrently",
                current.id
            )));
        }

        info!(appointment_id = current.id, from = %current.status, to = %next, "Appointment status changed");
        self.get(current.id).await
    }
}

/// Requested services as an ordered set: duplicates collapse to their
/// first occurrence; an empty selection is rejected
fn normalize_service_ids(ids: &[i32]) -> DomainResult<Vec<i32>> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }

    if unique.is_empty() {
        return Err(DomainError::Validation(
            "At least one service must be selected".to_string(),
        ));
    }
    Ok(unique)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::*;
    use crate::domain::{CenterClosure, Package, ServiceCenterStatus};
    use chrono::Duration;

    fn booking_for(f: &Fixture, date: NaiveDate, service_ids: Vec<i32>) -> BookingRequest {
        BookingRequest {
            customer_id: f.customer.id,
            vehicle_id: f.vehicle.id,
            service_center_id: f.center.id,
            date,
            service_ids,
        }
    }

    fn service(f: &Fixture) -> BookingService {
        let slots = Arc::new(SlotAllocator::new(f.repos.clone(), 10));
        BookingService::new(f.repos.clone(), slots)
    }

    #[tokio::test]
    async fn second_booking_on_full_day_is_rejected() {
        let f = fixture_with_limit(Some(1)).await;
        let booking = service(&f);
        let date = future_date(3);

        let first = booking
            .book(booking_for(&f, date, vec![f.oil_change.id]))
            .await
            .unwrap();
        assert_eq!(first.status, AppointmentStatus::Pending);
        assert_eq!(first.lines.len(), 1);

        let err = booking
            .book(booking_for(&f, date, vec![f.oil_change.id]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::CapacityExceeded { .. }));

        let listed = booking
            .list_for_customer(f.customer.id, PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(listed.total, 1);
    }

    #[tokio::test]
    async fn booking_prices_with_custom_price_and_snapshot() {
        let f = fixture().await;
        let booking = service(&f);

        let a = booking
            .book(booking_for(&f, future_date(1), vec![f.oil_change.id, f.brake_check.id]))
            .await
            .unwrap();

        // Oil change has a center price of 4500, brake check uses its base 3000
        assert_eq!(a.estimated_total_cost, 7500);
        assert_eq!(a.lines[0].price, 4500);
        assert_eq!(a.lines[1].price, 3000);
        assert_eq!(a.discount_amount, 0);
        assert_eq!(a.loyalty_points, 15);
    }

    #[tokio::test]
    async fn package_discount_applies_when_all_services_share_it() {
        let f = fixture().await;
        f.repos
            .catalog()
            .save_package(Package::new(
                "Full service",
                10,
                vec![f.oil_change.id, f.brake_check.id],
            ))
            .await
            .unwrap();

        let a = service(&f)
            .book(booking_for(&f, future_date(1), vec![f.oil_change.id, f.brake_check.id]))
            .await
            .unwrap();
        assert_eq!(a.discount_amount, 750);
        assert_eq!(a.estimated_total_cost, 6750);
        assert!(a.package_id.is_some());
    }

    #[tokio::test]
    async fn two_packages_means_no_discount() {
        let f = fixture().await;
        let catalog = f.repos.catalog();
        catalog
            .save_package(Package::new("Oil", 10, vec![f.oil_change.id]))
            .await
            .unwrap();
        catalog
            .save_package(Package::new("Brakes", 20, vec![f.brake_check.id]))
            .await
            .unwrap();

        let a = service(&f)
            .book(booking_for(&f, future_date(1), vec![f.oil_change.id, f.brake_check.id]))
            .await
            .unwrap();
        assert_eq!(a.discount_amount, 0);
        assert_eq!(a.package_id, None);
    }

    #[tokio::test]
    async fn vehicle_of_another_customer_is_rejected() {
        let f = fixture().await;
        let other = seed_customer(&*f.repos, "Other Owner", "other@example.com").await;

        let mut req = booking_for(&f, future_date(1), vec![f.oil_change.id]);
        req.customer_id = other.id;
        let err = service(&f).book(req).await.unwrap_err();
        assert!(matches!(err, DomainError::BookingRejected(_)));
    }

    #[tokio::test]
    async fn inactive_center_is_rejected() {
        let f = fixture().await;
        let mut closed = crate::domain::ServiceCenter::new("Closed Garage");
        closed.status = ServiceCenterStatus::Inactive;
        let closed = f.repos.service_centers().save(closed).await.unwrap();

        let mut req = booking_for(&f, future_date(1), vec![f.oil_change.id]);
        req.service_center_id = closed.id;
        let err = service(&f).book(req).await.unwrap_err();
        assert!(matches!(err, DomainError::BookingRejected(_)));
    }

    #[tokio::test]
    async fn past_date_and_closed_day_are_rejected() {
        let f = fixture().await;
        let booking = service(&f);

        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let err = booking
            .book(booking_for(&f, yesterday, vec![f.oil_change.id]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BookingRejected(_)));

        let holiday = future_date(4);
        f.repos
            .service_centers()
            .add_closure(CenterClosure {
                service_center_id: f.center.id,
                date: holiday,
                reason: Some("Public holiday".into()),
            })
            .await
            .unwrap();
        let err = booking
            .book(booking_for(&f, holiday, vec![f.oil_change.id]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BookingRejected(_)));
    }

    #[tokio::test]
    async fn empty_service_list_is_invalid() {
        let f = fixture().await;
        let err = service(&f)
            .book(booking_for(&f, future_date(1), vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_vehicle_is_not_found() {
        let f = fixture().await;
        let mut req = booking_for(&f, future_date(1), vec![f.oil_change.id]);
        req.vehicle_id = 4242;
        assert!(matches!(
            service(&f).book(req).await,
            Err(DomainError::NotFound { entity: "Vehicle", .. })
        ));
    }

    #[tokio::test]
    async fn service_not_offered_at_center_is_rejected() {
        let f = fixture().await;
        let err = service(&f)
            .book(booking_for(&f, future_date(1), vec![f.unlisted.id]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BookingRejected(_)));
    }

    #[tokio::test]
    async fn cancel_releases_slot_and_is_idempotent() {
        let f = fixture_with_limit(Some(1)).await;
        let booking = service(&f);
        let date = future_date(2);

        let a = booking
            .book(booking_for(&f, date, vec![f.oil_change.id]))
            .await
            .unwrap();
        assert_eq!(usage(&f, date).await, 1);

        let first = booking.cancel(a.id).await.unwrap();
        assert!(matches!(first, CancelOutcome::Cancelled(_)));
        assert_eq!(first.appointment().status, AppointmentStatus::Cancelled);
        assert_eq!(usage(&f, date).await, 0);

        let second = booking.cancel(a.id).await.unwrap();
        assert!(matches!(second, CancelOutcome::AlreadyCancelled(_)));
        assert_eq!(usage(&f, date).await, 0);

        // Freed slot can be booked again
        booking
            .book(booking_for(&f, date, vec![f.oil_change.id]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn confirmed_appointment_can_still_be_cancelled() {
        let f = fixture().await;
        let booking = service(&f);
        let date = future_date(2);

        let a = booking
            .book(booking_for(&f, date, vec![f.oil_change.id]))
            .await
            .unwrap();
        let confirmed = booking.confirm(a.id).await.unwrap();
        assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

        // Confirming twice is not a legal transition
        assert!(matches!(
            booking.confirm(a.id).await,
            Err(DomainError::Validation(_))
        ));

        booking.cancel(a.id).await.unwrap();
        assert_eq!(usage(&f, date).await, 0);
    }

    #[tokio::test]
    async fn cancel_unknown_appointment_is_not_found() {
        let f = fixture().await;
        assert!(matches!(
            service(&f).cancel(9999).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn quote_does_not_reserve() {
        let f = fixture_with_limit(Some(1)).await;
        let booking = service(&f);
        let date = future_date(2);

        let q = booking
            .quote(&booking_for(&f, date, vec![f.oil_change.id, f.oil_change.id]))
            .await
            .unwrap();
        assert_eq!(q.lines.len(), 1);
        assert_eq!(q.total, 4500);
        assert_eq!(usage(&f, date).await, 0);
    }

    async fn usage(f: &Fixture, date: NaiveDate) -> i32 {
        f.repos
            .daily_limits()
            .find(f.center.id, date)
            .await
            .unwrap()
            .map(|u| u.used)
            .unwrap_or(0)
    }
}
