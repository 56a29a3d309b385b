use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/technicians/:id/availability",
            get(handlers::availability::get_availability),
        )
        .route(
            "/api/technicians/:id/availability",
            put(handlers::availability::update_availability),
        )
        .route(
            "/api/technicians/:id/availability/check",
            get(handlers::availability::check_availability),
        )
        .route(
            "/api/technicians/:id/availability/count",
            get(handlers::availability::count_available_days),
        )
        .route(
            "/api/availability/match",
            get(handlers::availability::match_technicians),
        )
}
