use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::browse::dtos::{NotificationDto, PollResponseDto};
use crate::features::browse::services::BrowseService;
use crate::features::sessions::SessionContext;
use crate::shared::types::ApiResponse;

/// Poll for a new-upload notification
///
/// Fires at most once per session: the first poll that sees an upload
/// strictly newer than the session's start reports it, and every later
/// poll in that session stays quiet no matter what else is uploaded.
#[utoipa::path(
    get,
    path = "/api/notifications/poll",
    tag = "notifications",
    responses(
        (status = 200, description = "Poll result", body = ApiResponse<PollResponseDto>),
    )
)]
pub async fn poll_notifications(
    session: SessionContext,
    State(service): State<Arc<BrowseService>>,
) -> Result<Json<ApiResponse<PollResponseDto>>> {
    let latest = service.latest_upload().await?;

    // The check-and-set runs inside the session store's write lock, so
    // concurrent polls from the same session cannot both fire.
    let poll = session
        .update(move |state| {
            let Some(record) = latest else {
                return PollResponseDto {
                    new_upload: false,
                    latest: None,
                };
            };

            if record.timestamp > state.last_checked && !state.notified {
                state.notified = true;
                state.last_checked = record.timestamp;
                PollResponseDto {
                    new_upload: true,
                    latest: Some(NotificationDto {
                        name: record.name,
                        subject: record.subject,
                        timestamp: record.timestamp,
                    }),
                }
            } else {
                PollResponseDto {
                    new_upload: false,
                    latest: None,
                }
            }
        })
        .await;

    Ok(Json(ApiResponse::success(Some(poll), None, None)))
}
