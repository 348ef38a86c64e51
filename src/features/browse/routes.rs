use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::browse::handlers;
use crate::features::browse::services::BrowseService;

/// Create routes for the browse feature
pub fn routes(service: Arc<BrowseService>) -> Router {
    Router::new()
        .route("/api/subjects", get(handlers::list_subjects))
        .route(
            "/api/subjects/{subject}/uploads",
            get(handlers::list_subject_uploads),
        )
        .route(
            "/api/notifications/poll",
            get(handlers::poll_notifications),
        )
        .with_state(service)
}
