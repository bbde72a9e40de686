//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BookingService, PaymentService, SlotAllocator, TransferService};
use crate::domain::RepositoryProvider;

use super::common::{ApiResponse, PaginatedResponse, PaginationQuery};
use super::modules::{
    appointments, health, metrics, notifications, payments, request_id, service_centers,
    transfers,
};

/// Everything the HTTP layer needs. Handlers extract their own slice of it
/// through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub db: DatabaseConnection,
    pub slots: Arc<SlotAllocator>,
    pub booking: Arc<BookingService>,
    pub payments: Arc<PaymentService>,
    pub transfers: Arc<TransferService>,
    pub started_at: Arc<Instant>,
}

impl FromRef<AppState> for appointments::AppointmentAppState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            booking: Arc::clone(&s.booking),
            payments: Arc::clone(&s.payments),
        }
    }
}

impl FromRef<AppState> for payments::PaymentAppState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            payments: Arc::clone(&s.payments),
        }
    }
}

impl FromRef<AppState> for service_centers::ServiceCenterAppState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            slots: Arc::clone(&s.slots),
        }
    }
}

impl FromRef<AppState> for notifications::NotificationAppState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<AppState> for transfers::TransferAppState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            transfers: Arc::clone(&s.transfers),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        // Appointments
        appointments::book_appointment,
        appointments::quote_appointment,
        appointments::get_appointment,
        appointments::cancel_appointment,
        appointments::confirm_appointment,
        appointments::complete_appointment,
        appointments::list_customer_appointments,
        // Payments
        payments::record_payment,
        payments::payment_history,
        // Service centers
        service_centers::get_availability,
        service_centers::set_daily_limit,
        // Notifications
        notifications::list_customer_notifications,
        notifications::mark_notification_read,
        // Vehicle transfers
        transfers::create_transfer,
        transfers::get_transfer,
        transfers::accept_transfer,
        transfers::reject_transfer,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PaginatedResponse<appointments::AppointmentDto>,
            PaginationQuery,
            health::HealthResponse,
            health::ComponentHealth,
            appointments::BookAppointmentRequest,
            appointments::CompleteAppointmentRequest,
            appointments::AppointmentDto,
            appointments::AppointmentLineDto,
            appointments::QuoteDto,
            payments::RecordPaymentRequest,
            payments::PaymentLogDto,
            service_centers::AvailabilityDto,
            service_centers::SetDailyLimitRequest,
            notifications::NotificationDto,
            transfers::CreateTransferRequest,
            transfers::TransferDecisionRequest,
            transfers::TransferDto,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Appointments", description = "Booking, pricing and appointment lifecycle"),
        (name = "Payments", description = "Advance and final payments per appointment"),
        (name = "Service Centers", description = "Daily booking capacity"),
        (name = "Notifications", description = "Service reminder notifications"),
        (name = "Vehicle Transfers", description = "Ownership transfer between customers"),
    ),
    info(
        title = "Garage Service API",
        version = "1.0.0",
        description = "Appointment booking, payments and service reminders for vehicle service centers",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is mounted only when a Prometheus recorder was installed.
pub fn create_api_router(state: AppState, prometheus: Option<PrometheusHandle>) -> Router {
    let appointment_routes = Router::new()
        .route("/api/appointments", post(appointments::book_appointment))
        .route("/api/appointments/quote", post(appointments::quote_appointment))
        .route(
            "/api/appointments/{id}",
            get(appointments::get_appointment).delete(appointments::cancel_appointment),
        )
        .route(
            "/api/appointments/{id}/confirm",
            post(appointments::confirm_appointment),
        )
        .route(
            "/api/appointments/{id}/complete",
            post(appointments::complete_appointment),
        )
        .route(
            "/api/appointments/{id}/payments",
            post(payments::record_payment).get(payments::payment_history),
        )
        .route(
            "/api/customers/{id}/appointments",
            get(appointments::list_customer_appointments),
        );

    let service_center_routes = Router::new()
        .route(
            "/api/service-centers/{id}/availability",
            get(service_centers::get_availability),
        )
        .route(
            "/api/service-centers/{id}/daily-limits/{date}",
            put(service_centers::set_daily_limit),
        );

    let notification_routes = Router::new()
        .route(
            "/api/customers/{id}/notifications",
            get(notifications::list_customer_notifications),
        )
        .route(
            "/api/notifications/{id}/read",
            post(notifications::mark_notification_read),
        );

    let transfer_routes = Router::new()
        .route("/api/vehicle-transfers", post(transfers::create_transfer))
        .route("/api/vehicle-transfers/{id}", get(transfers::get_transfer))
        .route(
            "/api/vehicle-transfers/{id}/accept",
            post(transfers::accept_transfer),
        )
        .route(
            "/api/vehicle-transfers/{id}/reject",
            post(transfers::reject_transfer),
        );

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .merge(appointment_routes)
        .merge(service_center_routes)
        .merge(notification_routes)
        .merge(transfer_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()));

    if let Some(handle) = prometheus {
        metrics::describe_metrics();
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(metrics::MetricsState { handle }),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
