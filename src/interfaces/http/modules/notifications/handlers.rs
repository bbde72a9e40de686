//! Notification HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::domain::{DomainError, RepositoryProvider};
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult};

use super::dto::*;

/// Application state for notification handlers.
#[derive(Clone)]
pub struct NotificationAppState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}/notifications",
    tag = "Notifications",
    params(
        ("id" = i32, Path, description = "Customer ID"),
        NotificationListQuery
    ),
    responses(
        (status = 200, description = "Notifications, newest first", body = ApiResponse<Vec<NotificationDto>>),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn list_customer_notifications(
    State(state): State<NotificationAppState>,
    Path(customer_id): Path<i32>,
    Query(query): Query<NotificationListQuery>,
) -> ApiResult<Vec<NotificationDto>> {
    state
        .repos
        .customers()
        .find_by_id(customer_id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Customer", "id", customer_id)))?;

    let notifications = state
        .repos
        .notifications()
        .find_for_customer(customer_id, query.unread_only)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        notifications.into_iter().map(NotificationDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked as read", body = ApiResponse<String>),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_notification_read(
    State(state): State<NotificationAppState>,
    Path(id): Path<i32>,
) -> ApiResult<String> {
    state
        .repos
        .notifications()
        .mark_read(id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(format!(
        "Notification {} marked as read",
        id
    ))))
}
