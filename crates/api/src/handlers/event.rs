//! Handlers for scheduled events, the booked-commitment side of the two
//! calendars. Events carry explicit clock times and are kept strictly apart
//! from the offered-availability set; a client may display both together but
//! the server never merges them.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use fieldsync_core::{
    errors::FieldError,
    models::event::{CreateEventRequest, GetEventsResponse, ScheduledEvent},
};
use fieldsync_db::models::DbScheduledEvent;
use uuid::Uuid;

use crate::{
    handlers::{availability::parse_date, technician::ensure_technician},
    middleware::error_handling::AppError,
    ApiState,
};

/// Query parameters for the event list endpoint
#[derive(Debug, Deserialize)]
pub struct EventRangeQuery {
    /// Inclusive range start, formatted YYYY-MM-DD
    pub start: String,

    /// Inclusive range end, formatted YYYY-MM-DD
    pub end: String,
}

fn event_from_row(row: DbScheduledEvent) -> Result<ScheduledEvent, FieldError> {
    let kind = row
        .kind
        .parse()
        .map_err(|_| FieldError::Internal(format!("Unknown stored event kind: {}", row.kind).into()))?;

    Ok(ScheduledEvent {
        id: row.id,
        technician_id: row.technician_id,
        date: row.date,
        start_time: row.start_time,
        end_time: row.end_time,
        kind,
        location: row.location,
        created_at: row.created_at,
    })
}

/// Books a commitment for a technician
///
/// # Endpoint
///
/// ```text
/// POST /api/technicians/:id/events
/// ```
///
/// The booking flow reads availability through the check endpoints but its
/// commitments land here, in the separate event calendar. A notification is
/// queued for the technician so the new booking shows up on their next pull.
#[axum::debug_handler]
pub async fn create_event(
    State(state): State<Arc<ApiState>>,
    Path(technician_id): Path<Uuid>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<Json<ScheduledEvent>, AppError> {
    if payload.end_time <= payload.start_time {
        return Err(AppError(FieldError::InvalidInput(
            "Event end time must be after start time".to_string(),
        )));
    }

    ensure_technician(&state, technician_id).await?;

    let row = fieldsync_db::repositories::event::create_scheduled_event(
        &state.db_pool,
        technician_id,
        payload.date,
        payload.start_time,
        payload.end_time,
        payload.kind.as_str(),
        &payload.location,
    )
    .await
    .map_err(FieldError::Storage)?;

    let body = format!(
        "New {} scheduled on {} at {} ({})",
        payload.kind.as_str(),
        payload.date,
        payload.start_time,
        payload.location
    );
    fieldsync_db::repositories::notification::create_notification(
        &state.db_pool,
        technician_id,
        &body,
    )
    .await
    .map_err(FieldError::Storage)?;

    Ok(Json(event_from_row(row)?))
}

/// Lists a technician's booked commitments within a date range
///
/// # Endpoint
///
/// ```text
/// GET /api/technicians/:id/events?start=2025-05-19&end=2025-05-25
/// ```
#[axum::debug_handler]
pub async fn list_events(
    State(state): State<Arc<ApiState>>,
    Path(technician_id): Path<Uuid>,
    Query(query): Query<EventRangeQuery>,
) -> Result<Json<GetEventsResponse>, AppError> {
    let start = parse_date(&query.start)?;
    let end = parse_date(&query.end)?;

    ensure_technician(&state, technician_id).await?;

    let rows = fieldsync_db::repositories::event::get_events_by_technician_id(
        &state.db_pool,
        technician_id,
        start,
        end,
    )
    .await
    .map_err(FieldError::Storage)?;

    let events = rows
        .into_iter()
        .map(event_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(GetEventsResponse {
        technician_id,
        events,
    }))
}
