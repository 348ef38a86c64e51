use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::features::browse::dtos::{BrowseUploadDto, SubjectListDto};
use crate::features::browse::services::BrowseService;
use crate::features::sessions::SessionContext;
use crate::shared::subject::Subject;
use crate::shared::types::{ApiResponse, Meta};

/// List subjects
///
/// Returns the full taxonomy (for the upload form) and the browsable
/// subset (subjects whose folder exists on disk, sorted).
#[utoipa::path(
    get,
    path = "/api/subjects",
    tag = "browse",
    responses(
        (status = 200, description = "Subject overview", body = ApiResponse<SubjectListDto>),
    )
)]
pub async fn list_subjects(
    State(service): State<Arc<BrowseService>>,
) -> Result<Json<ApiResponse<SubjectListDto>>> {
    let overview = service.subject_overview().await;
    Ok(Json(ApiResponse::success(Some(overview), None, None)))
}

/// List uploads for a subject, newest first
///
/// Also remembers the subject as this session's selection so the UI can
/// restore it on reload.
#[utoipa::path(
    get,
    path = "/api/subjects/{subject}/uploads",
    tag = "browse",
    params(
        ("subject" = String, Path, description = "Subject label, e.g. Phy.")
    ),
    responses(
        (status = 200, description = "Uploads for the subject", body = ApiResponse<Vec<BrowseUploadDto>>),
        (status = 404, description = "Unknown subject")
    )
)]
pub async fn list_subject_uploads(
    session: SessionContext,
    State(service): State<Arc<BrowseService>>,
    Path(subject): Path<String>,
) -> Result<Json<ApiResponse<Vec<BrowseUploadDto>>>> {
    let subject = Subject::from_label(&subject)
        .ok_or_else(|| AppError::NotFound(format!("Subject '{}' not found", subject)))?;

    let uploads = service.list_by_subject(subject).await?;

    session
        .update(move |state| state.selected_subject = Some(subject))
        .await;

    let total = uploads.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(uploads),
        None,
        Some(Meta { total }),
    )))
}
