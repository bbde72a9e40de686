//! End-to-end tests driving the router against an in-memory database

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::application::test_support::{fixture, fixture_with_limit, future_date, seed_customer, Fixture};
use crate::application::{
    BookingService, ManualPaymentGateway, NotificationGenerator, PaymentService, SlotAllocator,
    TransferService,
};
use crate::config::NotificationConfig;
use crate::domain::ServiceReminder;
use crate::shared::ShutdownSignal;

use super::{create_api_router, AppState};

fn app(fx: &Fixture) -> Router {
    let slots = Arc::new(SlotAllocator::new(fx.repos.clone(), 10));
    let state = AppState {
        repos: fx.repos.clone(),
        db: fx.db.clone(),
        booking: Arc::new(BookingService::new(fx.repos.clone(), slots.clone())),
        payments: Arc::new(PaymentService::new(
            fx.repos.clone(),
            Arc::new(ManualPaymentGateway),
        )),
        transfers: Arc::new(TransferService::new(fx.repos.clone(), 72)),
        slots,
        started_at: Arc::new(Instant::now()),
    };
    create_api_router(state, None)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn booking_body(fx: &Fixture, days_ahead: i64) -> Value {
    json!({
        "customerId": fx.customer.id,
        "vehicleId": fx.vehicle.id,
        "serviceCenterId": fx.center.id,
        "date": future_date(days_ahead).to_string(),
        "serviceIds": [fx.oil_change.id, fx.brake_check.id],
    })
}

async fn book(app: &Router, fx: &Fixture, days_ahead: i64) -> i64 {
    let (status, body) = send(app, "POST", "/api/appointments", Some(booking_body(fx, days_ahead))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let fx = fixture().await;
    let (status, body) = send(&app(&fx), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let fx = fixture().await;
    let (status, body) = send(&app(&fx), "GET", "/api-doc/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/appointments"].is_object());
}

#[tokio::test]
async fn book_then_fetch_appointment() {
    let fx = fixture().await;
    let app = app(&fx);

    let (status, body) = send(&app, "POST", "/api/appointments", Some(booking_body(&fx, 3))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "Pending");
    assert_eq!(body["data"]["estimated_total_cost"], 7500);
    assert_eq!(body["data"]["loyalty_points"], 15);
    assert_eq!(body["data"]["services"].as_array().unwrap().len(), 2);

    let id = body["data"]["id"].as_i64().unwrap();
    let (status, body) = send(&app, "GET", &format!("/api/appointments/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["services"][0]["price"], 4500);

    let uri = format!(
        "/api/service-centers/{}/availability?date={}",
        fx.center.id,
        future_date(3)
    );
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["used"], 1);
    assert_eq!(body["data"]["remaining"], 9);
}

#[tokio::test]
async fn quote_does_not_consume_capacity() {
    let fx = fixture_with_limit(Some(1)).await;
    let app = app(&fx);

    let (status, body) =
        send(&app, "POST", "/api/appointments/quote", Some(booking_body(&fx, 2))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["subtotal"], 7500);
    assert_eq!(body["data"]["discount"], 0);
    assert_eq!(body["data"]["total"], 7500);

    book(&app, &fx, 2).await;
}

#[tokio::test]
async fn full_day_returns_capacity_code() {
    let fx = fixture_with_limit(Some(1)).await;
    let app = app(&fx);

    book(&app, &fx, 4).await;
    let (status, body) = send(&app, "POST", "/api/appointments", Some(booking_body(&fx, 4))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "CAPACITY_EXCEEDED");
}

#[tokio::test]
async fn unavailable_service_is_rejected() {
    let fx = fixture().await;
    let mut request = booking_body(&fx, 2);
    request["serviceIds"] = json!([fx.unlisted.id]);

    let (status, body) = send(&app(&fx), "POST", "/api/appointments", Some(request)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "BOOKING_REJECTED");
}

#[tokio::test]
async fn malformed_and_invalid_bodies() {
    let fx = fixture().await;
    let app = app(&fx);

    let request = Request::builder()
        .method("POST")
        .uri("/api/appointments")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut request = booking_body(&fx, 2);
    request["customerId"] = json!(0);
    let (status, _) = send(&app, "POST", "/api/appointments", Some(request)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut request = booking_body(&fx, 2);
    request["serviceIds"] = json!([]);
    let (status, body) = send(&app, "POST", "/api/appointments", Some(request)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_appointment_is_404() {
    let fx = fixture().await;
    let app = app(&fx);

    let (status, body) = send(&app, "GET", "/api/appointments/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(&app, "DELETE", "/api/appointments/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cancel_is_idempotent_and_frees_the_slot() {
    let fx = fixture_with_limit(Some(1)).await;
    let app = app(&fx);
    let id = book(&app, &fx, 5).await;

    let uri = format!("/api/appointments/{}", id);
    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(body["data"]["status"], "Cancelled");

    // The freed slot can be booked again
    book(&app, &fx, 5).await;
}

#[tokio::test]
async fn confirm_complete_and_list() {
    let fx = fixture().await;
    let app = app(&fx);
    let id = book(&app, &fx, 1).await;

    let (status, body) = send(&app, "POST", &format!("/api/appointments/{}/complete", id), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);

    let (status, body) = send(&app, "POST", &format!("/api/appointments/{}/confirm", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Confirmed");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/appointments/{}/complete", id),
        Some(json!({ "actual_total_cost": 8000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Completed");
    assert_eq!(body["data"]["actual_total_cost"], 8000);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/customers/{}/appointments?page=1&limit=10", fx.customer.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["id"], id);
}

#[tokio::test]
async fn payments_are_recorded_and_listed() {
    let fx = fixture().await;
    let app = app(&fx);
    let id = book(&app, &fx, 2).await;
    let uri = format!("/api/appointments/{}/payments", id);

    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(json!({ "amount": 2000, "method": "Card", "type": "Advance" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["status"], "Success");
    assert!(body["data"]["transaction_reference"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(json!({ "amount": 2000, "method": "Card", "type": "Advance" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(json!({ "amount": 100, "method": "Cheque", "type": "Final" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, "GET", &format!("/api/appointments/{}", id), None).await;
    assert_eq!(body["data"]["is_advance_payment_completed"], true);
}

#[tokio::test]
async fn payment_reference_is_kept_and_snake_case_bodies_still_parse() {
    let fx = fixture().await;
    let app = app(&fx);

    let legacy = json!({
        "customer_id": fx.customer.id,
        "vehicle_id": fx.vehicle.id,
        "service_center_id": fx.center.id,
        "appointment_date": future_date(2).to_string(),
        "service_ids": [fx.oil_change.id],
    });
    let (status, body) = send(&app, "POST", "/api/appointments", Some(legacy)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/appointments/{}/payments", id),
        Some(json!({ "amount": 100, "method": "Card", "type": "Advance", "reference": "R1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["transaction_reference"], "R1");
    assert_eq!(body["data"]["payment_type"], "Advance");
}

#[tokio::test]
async fn daily_limit_override() {
    let fx = fixture().await;
    let app = app(&fx);
    book(&app, &fx, 6).await;

    let uri = format!(
        "/api/service-centers/{}/daily-limits/{}",
        fx.center.id,
        future_date(6)
    );
    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "max_appointments": 3 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["max_appointments"], 3);
    assert_eq!(body["data"]["remaining"], 2);

    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "max_appointments": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = format!("/api/service-centers/999/daily-limits/{}", future_date(6));
    let (status, _) = send(&app, "PUT", &missing, Some(json!({ "max_appointments": 3 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notifications_list_and_mark_read() {
    let fx = fixture().await;
    let app = app(&fx);
    let today = Utc::now().date_naive();

    fx.repos
        .reminders()
        .save(ServiceReminder::new(
            fx.vehicle.id,
            fx.oil_change.id,
            today + Duration::days(2),
            7,
        ))
        .await
        .unwrap();
    NotificationGenerator::new(fx.repos.clone(), NotificationConfig::default())
        .run_once(today, Utc::now(), &ShutdownSignal::new())
        .await
        .unwrap();

    let list_uri = format!("/api/customers/{}/notifications", fx.customer.id);
    let (status, body) = send(&app, "GET", &list_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["priority"], "High");
    assert_eq!(items[0]["is_read"], false);

    let id = items[0]["id"].as_i64().unwrap();
    let (status, _) = send(&app, "POST", &format!("/api/notifications/{}/read", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &format!("{}?unread_only=true", list_uri), None).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, "POST", "/api/notifications/999/read", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/api/customers/999/notifications", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn vehicle_transfer_accept_reassigns_owner() {
    let fx = fixture().await;
    let app = app(&fx);
    let buyer = seed_customer(&*fx.repos, "Ravi Nair", "ravi@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/vehicle-transfers",
        Some(json!({
            "vehicle_id": fx.vehicle.id,
            "from_customer_id": fx.customer.id,
            "to_customer_id": buyer.id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["status"], "Pending");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/api/vehicle-transfers",
        Some(json!({
            "vehicle_id": fx.vehicle.id,
            "from_customer_id": fx.customer.id,
            "to_customer_id": buyer.id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/vehicle-transfers/{}/reject", id),
        Some(json!({ "customer_id": fx.customer.id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/vehicle-transfers/{}/accept", id),
        Some(json!({ "customer_id": buyer.id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Accepted");

    let vehicle = fx
        .repos
        .vehicles()
        .find_by_id(fx.vehicle.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(vehicle.customer_id, buyer.id);

    let (status, body) = send(&app, "GET", &format!("/api/vehicle-transfers/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["resolved_at"].is_string());
}
