//! # Availability Handlers
//!
//! This module contains handlers for the technician availability calendar:
//! loading a technician's half-day slot set, replacing it wholesale, and
//! answering the read-only queries used by calendar rendering and by
//! technician matching.
//!
//! ## Mutation model
//!
//! A dashboard session loads the current set, applies slot toggles locally,
//! and submits one whole-set replace. The server never patches individual
//! days; the replace either lands completely or the stored set stays as it
//! was. Two sessions editing the same technician resolve last-writer-wins,
//! an accepted limitation of the whole-set contract.
//!
//! ## Seeding
//!
//! A technician with no stored calendar is seeded on first load with a
//! forward-looking window of fully open business days. The store itself only
//! reports the absence; this module is the caller responsible for seeding.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;

use fieldsync_core::{
    errors::FieldError,
    models::availability::{
        AvailabilityCheckResponse, AvailabilityDay, AvailabilitySet, CountAvailableDaysResponse,
        DaySlots, GetAvailabilityResponse, MatchResponse, Slot, TechnicianMatch,
        UpdateAvailabilityRequest, UpdateAvailabilityResponse,
    },
};
use fieldsync_db::models::DbAvailabilityDay;
use uuid::Uuid;

use crate::{handlers::technician::ensure_technician, middleware::error_handling::AppError, ApiState};

/// Query parameters for the slot/day check endpoint
///
/// `date` is required; `slot` narrows the question from "any slot open that
/// day" to one specific half-day window.
#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    /// Date to check, formatted YYYY-MM-DD
    pub date: String,

    /// Optional slot name ("morning" or "afternoon")
    pub slot: Option<String>,
}

/// Query parameters for the range count endpoint
#[derive(Debug, Deserialize)]
pub struct CountQuery {
    /// Inclusive range start, formatted YYYY-MM-DD
    pub start: String,

    /// Inclusive range end, formatted YYYY-MM-DD
    pub end: String,
}

/// Query parameters for the technician match endpoint
#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    /// Inclusive range start, formatted YYYY-MM-DD
    pub start: String,

    /// Inclusive range end, formatted YYYY-MM-DD
    pub end: String,

    /// Maximum number of technicians to return (default: 5)
    pub count: Option<usize>,
}

/// Parses a YYYY-MM-DD date string at the HTTP boundary.
///
/// A malformed date is an input error, distinct from a well-formed date that
/// simply has no availability record.
pub fn parse_date(value: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        FieldError::InvalidInput(format!("Invalid date: {}. Must be YYYY-MM-DD", value))
    })
}

fn day_from_row(row: DbAvailabilityDay) -> AvailabilityDay {
    AvailabilityDay::new(
        row.date,
        DaySlots {
            morning: row.morning,
            afternoon: row.afternoon,
        },
    )
}

/// Loads a technician's stored set without seeding. Zero rows load as an
/// empty set.
async fn load_set(state: &ApiState, technician_id: Uuid) -> Result<AvailabilitySet, AppError> {
    let rows = fieldsync_db::repositories::availability::get_availability_by_technician_id(
        &state.db_pool,
        technician_id,
    )
    .await
    .map_err(FieldError::Storage)?;

    Ok(AvailabilitySet::from_days(rows.into_iter().map(day_from_row)))
}

/// Returns a technician's availability calendar
///
/// # Endpoint
///
/// ```text
/// GET /api/technicians/:id/availability
/// ```
///
/// When the technician has no stored calendar at all, the default
/// forward-looking window (the next N business days, every slot open) is
/// seeded, persisted, and returned, so subsequent loads agree with what the
/// caller saw.
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(technician_id): Path<Uuid>,
) -> Result<Json<GetAvailabilityResponse>, AppError> {
    ensure_technician(&state, technician_id).await?;

    let rows = fieldsync_db::repositories::availability::get_availability_by_technician_id(
        &state.db_pool,
        technician_id,
    )
    .await
    .map_err(FieldError::Storage)?;

    let set = if rows.is_empty() {
        // No prior data for this technician. Seed the default window and
        // persist it before answering.
        let today = Utc::now().date_naive();
        let seeded = AvailabilitySet::default_window(today, state.config.default_window_days);
        fieldsync_db::repositories::availability::replace_availability(
            &state.db_pool,
            technician_id,
            &seeded.days(),
        )
        .await
        .map_err(FieldError::Storage)?;
        seeded
    } else {
        AvailabilitySet::from_days(rows.into_iter().map(day_from_row))
    };

    Ok(Json(GetAvailabilityResponse {
        technician_id,
        days: set.days(),
    }))
}

/// Replaces a technician's availability calendar wholesale
///
/// # Endpoint
///
/// ```text
/// PUT /api/technicians/:id/availability
/// ```
///
/// The payload is the complete new set. It is normalized through the model
/// before persisting: duplicate dates resolve last-wins, days with both
/// slots closed are dropped, and the derived `available` flag is recomputed
/// from the slots. The replace is transactional; on a storage failure the
/// previously stored set remains the truth and the caller may retry.
#[axum::debug_handler]
pub async fn update_availability(
    State(state): State<Arc<ApiState>>,
    Path(technician_id): Path<Uuid>,
    Json(payload): Json<UpdateAvailabilityRequest>,
) -> Result<Json<UpdateAvailabilityResponse>, AppError> {
    ensure_technician(&state, technician_id).await?;

    let set = AvailabilitySet::from_days(payload.days);

    fieldsync_db::repositories::availability::replace_availability(
        &state.db_pool,
        technician_id,
        &set.days(),
    )
    .await
    .map_err(FieldError::Storage)?;

    Ok(Json(UpdateAvailabilityResponse {
        technician_id,
        updated_at: Utc::now(),
    }))
}

/// Answers whether a technician is open on a date, or in one slot of it
///
/// # Endpoint
///
/// ```text
/// GET /api/technicians/:id/availability/check?date=2025-05-20&slot=morning
/// ```
///
/// A date with no record answers `false`; absence is an expected state, not
/// an error. Only a malformed date or an unknown slot name fails.
#[axum::debug_handler]
pub async fn check_availability(
    State(state): State<Arc<ApiState>>,
    Path(technician_id): Path<Uuid>,
    Query(query): Query<CheckQuery>,
) -> Result<Json<AvailabilityCheckResponse>, AppError> {
    let date = parse_date(&query.date)?;
    let slot = query
        .slot
        .as_deref()
        .map(str::parse::<Slot>)
        .transpose()?;

    ensure_technician(&state, technician_id).await?;
    let set = load_set(&state, technician_id).await?;

    let available = match slot {
        Some(slot) => set.is_slot_available(date, slot),
        None => set.is_date_available(date),
    };

    Ok(Json(AvailabilityCheckResponse {
        technician_id,
        date,
        slot,
        available,
    }))
}

/// Counts a technician's open days within an inclusive date range
///
/// # Endpoint
///
/// ```text
/// GET /api/technicians/:id/availability/count?start=2025-05-19&end=2025-05-25
/// ```
///
/// Used for calendar summary badges. An inverted range counts zero days.
#[axum::debug_handler]
pub async fn count_available_days(
    State(state): State<Arc<ApiState>>,
    Path(technician_id): Path<Uuid>,
    Query(query): Query<CountQuery>,
) -> Result<Json<CountAvailableDaysResponse>, AppError> {
    let start = parse_date(&query.start)?;
    let end = parse_date(&query.end)?;

    ensure_technician(&state, technician_id).await?;
    let set = load_set(&state, technician_id).await?;

    Ok(Json(CountAvailableDaysResponse {
        technician_id,
        start,
        end,
        available_days: set.count_available_days_in_range(start, end),
    }))
}

/// Ranks technicians by open days within a date range
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/match?start=2025-05-19&end=2025-05-25&count=3
/// ```
///
/// The assignment flow uses this to answer "who has the most open slots this
/// week". For each technician the stored set is loaded and its open days in
/// the range are counted; technicians with nothing open are omitted. Results
/// sort by open-day count descending, ties by name, truncated to `count`.
#[axum::debug_handler]
pub async fn match_technicians(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<MatchResponse>, AppError> {
    let start = parse_date(&query.start)?;
    let end = parse_date(&query.end)?;
    let count = query.count.unwrap_or(5);

    let technicians = fieldsync_db::repositories::technician::list_technicians(&state.db_pool)
        .await
        .map_err(FieldError::Storage)?;

    let mut matches = Vec::new();
    for technician in technicians {
        let set = load_set(&state, technician.id).await?;
        let available_days = set.count_available_days_in_range(start, end);

        if available_days > 0 {
            matches.push(TechnicianMatch {
                id: technician.id,
                name: technician.name,
                available_days,
            });
        }
    }

    // Most open days first; ties resolve alphabetically for a stable order
    matches.sort_by(|a, b| {
        b.available_days
            .cmp(&a.available_days)
            .then_with(|| a.name.cmp(&b.name))
    });

    if matches.len() > count {
        matches.truncate(count);
    }

    Ok(Json(MatchResponse { matches }))
}
