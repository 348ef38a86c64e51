use axum::{routing::get, Router};

use crate::features::sessions::handlers;

/// Create routes for the sessions feature
pub fn routes() -> Router {
    Router::new().route("/api/session", get(handlers::get_session))
}
