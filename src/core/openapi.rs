use utoipa::{Modify, OpenApi};

use crate::features::browse::{dtos as browse_dtos, handlers as browse_handlers};
use crate::features::sessions;
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Uploads
        uploads_handlers::submit_upload,
        // Browse
        browse_handlers::list_subjects,
        browse_handlers::list_subject_uploads,
        // Notifications
        browse_handlers::poll_notifications,
        // Session
        sessions::handlers::get_session,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Uploads
            uploads_dtos::UploadFormDto,
            uploads_dtos::UploadResponseDto,
            ApiResponse<uploads_dtos::UploadResponseDto>,
            // Browse
            browse_dtos::SubjectListDto,
            browse_dtos::BrowseUploadDto,
            ApiResponse<browse_dtos::SubjectListDto>,
            ApiResponse<Vec<browse_dtos::BrowseUploadDto>>,
            // Notifications
            browse_dtos::NotificationDto,
            browse_dtos::PollResponseDto,
            ApiResponse<browse_dtos::PollResponseDto>,
            // Session
            sessions::dtos::SessionViewDto,
            ApiResponse<sessions::dtos::SessionViewDto>,
        )
    ),
    tags(
        (name = "uploads", description = "Question uploads (image plus optional audio and explanation)"),
        (name = "browse", description = "Subject taxonomy and per-subject question listings"),
        (name = "notifications", description = "Per-session new-upload notification polling"),
        (name = "session", description = "Browser session state"),
    ),
    info(
        title = "StudyDrop API",
        version = "0.1.0",
        description = "API documentation for StudyDrop",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
