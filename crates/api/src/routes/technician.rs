use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/technicians", post(handlers::technician::create_technician))
        .route("/api/technicians/:id", get(handlers::technician::get_technician))
}
