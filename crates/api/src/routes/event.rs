use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/technicians/:id/events",
            get(handlers::event::list_events),
        )
        .route(
            "/api/technicians/:id/events",
            post(handlers::event::create_event),
        )
}
