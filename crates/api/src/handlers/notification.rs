//! Notification handlers. Clients pull their inbox when they need it; the
//! server keeps no polling loop and pushes nothing.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use fieldsync_core::{
    errors::FieldError,
    models::notification::{GetNotificationsResponse, Notification},
};
use fieldsync_db::models::DbNotification;
use uuid::Uuid;

use crate::{
    handlers::technician::ensure_technician, middleware::error_handling::AppError, ApiState,
};

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// When true, only unread notifications are returned
    pub unread: Option<bool>,
}

fn notification_from_row(row: DbNotification) -> Notification {
    Notification {
        id: row.id,
        technician_id: row.technician_id,
        body: row.body,
        read: row.is_read,
        created_at: row.created_at,
    }
}

#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<Arc<ApiState>>,
    Path(technician_id): Path<Uuid>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<GetNotificationsResponse>, AppError> {
    ensure_technician(&state, technician_id).await?;

    let rows = fieldsync_db::repositories::notification::get_notifications_by_technician_id(
        &state.db_pool,
        technician_id,
        query.unread.unwrap_or(false),
    )
    .await
    .map_err(FieldError::Storage)?;

    Ok(Json(GetNotificationsResponse {
        technician_id,
        notifications: rows.into_iter().map(notification_from_row).collect(),
    }))
}

#[axum::debug_handler]
pub async fn mark_notification_read(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Notification>, AppError> {
    let row = fieldsync_db::repositories::notification::mark_notification_read(&state.db_pool, id)
        .await
        .map_err(FieldError::Storage)?
        .ok_or_else(|| {
            AppError(FieldError::NotFound(format!(
                "Notification with ID {} not found",
                id
            )))
        })?;

    Ok(Json(notification_from_row(row)))
}
