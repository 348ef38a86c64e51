use axum::Json;

use crate::core::error::Result;
use crate::features::sessions::dtos::SessionViewDto;
use crate::features::sessions::middleware::SessionContext;
use crate::shared::types::ApiResponse;

/// Get the current session's view state
///
/// The UI calls this on load to restore the last browsed subject.
/// Always succeeds; a request without a session cookie gets a fresh
/// session (and the cookie) as a side effect.
#[utoipa::path(
    get,
    path = "/api/session",
    tag = "session",
    responses(
        (status = 200, description = "Current session state", body = ApiResponse<SessionViewDto>),
    )
)]
pub async fn get_session(session: SessionContext) -> Result<Json<ApiResponse<SessionViewDto>>> {
    let state = session.snapshot().await;

    let view = SessionViewDto {
        selected_subject: state.selected_subject.map(|s| s.label().to_string()),
    };

    Ok(Json(ApiResponse::success(Some(view), None, None)))
}
