use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use fieldsync_core::{
    errors::FieldError,
    models::technician::{CreateTechnicianRequest, TechnicianResponse},
};
use fieldsync_db::models::DbTechnician;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Looks up a technician or fails with NotFound. Shared by every handler
/// that operates on a technician-scoped resource.
pub(crate) async fn ensure_technician(
    state: &ApiState,
    technician_id: Uuid,
) -> Result<DbTechnician, AppError> {
    fieldsync_db::repositories::technician::get_technician_by_id(&state.db_pool, technician_id)
        .await
        .map_err(FieldError::Storage)?
        .ok_or_else(|| {
            AppError(FieldError::NotFound(format!(
                "Technician with ID {} not found",
                technician_id
            )))
        })
}

fn response_from_row(row: DbTechnician) -> TechnicianResponse {
    TechnicianResponse {
        id: row.id,
        name: row.name,
        specialty: row.specialty,
        created_at: row.created_at,
    }
}

#[axum::debug_handler]
pub async fn create_technician(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateTechnicianRequest>,
) -> Result<Json<TechnicianResponse>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(FieldError::InvalidInput(
            "Technician name must not be empty".to_string(),
        )));
    }

    let technician = fieldsync_db::repositories::technician::create_technician(
        &state.db_pool,
        &payload.name,
        payload.specialty.as_deref(),
    )
    .await
    .map_err(FieldError::Storage)?;

    Ok(Json(response_from_row(technician)))
}

#[axum::debug_handler]
pub async fn get_technician(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TechnicianResponse>, AppError> {
    let technician = ensure_technician(&state, id).await?;

    Ok(Json(response_from_row(technician)))
}
