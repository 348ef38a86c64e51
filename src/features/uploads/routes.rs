use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::uploads::dtos::{MAX_AUDIO_SIZE, MAX_IMAGE_SIZE};
use crate::features::uploads::handlers::submit_upload;
use crate::features::uploads::services::UploadService;

/// Create routes for the uploads feature
pub fn routes(upload_service: Arc<UploadService>) -> Router {
    Router::new()
        .route(
            "/api/uploads",
            // Allow body size up to both files plus multipart overhead
            post(submit_upload)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + MAX_AUDIO_SIZE + 1024 * 1024)),
        )
        .with_state(upload_service)
}
