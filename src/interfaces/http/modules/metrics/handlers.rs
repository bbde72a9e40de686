//! Prometheus scrape endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Register help text for the workflow counters so they show up with
/// descriptions on the first scrape.
pub fn describe_metrics() {
    metrics::describe_counter!("http_requests_total", "HTTP requests by method, path and status");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        metrics::Unit::Seconds,
        "HTTP request latency"
    );
    metrics::describe_counter!("appointments_booked_total", "Appointments booked");
    metrics::describe_counter!(
        "appointments_rejected_total",
        "Booking attempts rejected, by error code"
    );
    metrics::describe_counter!("appointments_cancelled_total", "Appointments cancelled");
    metrics::describe_counter!("payments_recorded_total", "Payment attempts by status");
    metrics::describe_counter!("notifications_created_total", "Reminder notifications created");
    metrics::describe_counter!(
        "notification_scan_failures_total",
        "Notification scans that failed or timed out"
    );
}

/// `GET /metrics`
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}
