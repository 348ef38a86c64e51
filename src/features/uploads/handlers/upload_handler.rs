use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::uploads::dtos::{
    extension_of, is_audio_extension_allowed, is_image_extension_allowed, NewAudio, NewUpload,
    UploadFieldsDto, UploadFormDto, UploadResponseDto, ALLOWED_AUDIO_EXTENSIONS,
    ALLOWED_IMAGE_EXTENSIONS, MAX_AUDIO_SIZE, MAX_IMAGE_SIZE,
};
use crate::features::uploads::services::UploadService;
use crate::shared::subject::Subject;
use crate::shared::types::ApiResponse;

/// Submit a question
///
/// Accepts multipart/form-data with:
/// - `name`: Uploader's name (required)
/// - `subject`: Subject label from the fixed taxonomy (required)
/// - `image`: The question image, jpg/jpeg/png (required; stored as PNG)
/// - `audio`: Optional voice note, mp3/wav
/// - `explanation`: Optional text explanation
///
/// Validation is all-or-nothing: no file is written and no record is
/// stored unless every provided part is valid.
#[utoipa::path(
    post,
    path = "/api/uploads",
    tag = "uploads",
    request_body(
        content = UploadFormDto,
        content_type = "multipart/form-data",
        description = "Question upload form with image and optional audio/explanation",
    ),
    responses(
        (status = 201, description = "Question uploaded successfully", body = ApiResponse<UploadResponseDto>),
        (status = 400, description = "Invalid field or file"),
        (status = 413, description = "File too large"),
        (status = 500, description = "Storage or database failure")
    )
)]
pub async fn submit_upload(
    State(service): State<Arc<UploadService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadResponseDto>>), AppError> {
    let mut name: Option<String> = None;
    let mut subject: Option<String> = None;
    let mut explanation: Option<String> = None;
    let mut image: Option<(String, Vec<u8>)> = None;
    let mut audio: Option<(String, Vec<u8>)> = None;

    // Process multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "name" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read name field: {}", e))
                })?;
                name = Some(text.trim().to_string());
            }
            "subject" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read subject field: {}", e))
                })?;
                subject = Some(text.trim().to_string());
            }
            "explanation" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read explanation field: {}", e))
                })?;
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    explanation = Some(trimmed.to_string());
                }
            }
            "image" => {
                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read image bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;

                image = Some((fname, data.to_vec()));
            }
            "audio" => {
                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read audio bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read audio data: {}", e))
                })?;

                // An empty audio part means the field was left blank
                if !data.is_empty() {
                    audio = Some((fname, data.to_vec()));
                }
            }
            _ => {
                // Ignore unknown fields
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    // Validate text fields
    let fields = UploadFieldsDto {
        name: name.unwrap_or_default(),
        subject: subject.unwrap_or_default(),
        explanation,
    };
    fields
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let subject = Subject::from_label(&fields.subject).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown subject '{}'. Valid subjects: {}",
            fields.subject,
            Subject::labels_joined()
        ))
    })?;

    // Validate the image part
    let (image_name, image_data) =
        image.ok_or_else(|| AppError::BadRequest("Image file is required".to_string()))?;

    if image_data.is_empty() {
        return Err(AppError::BadRequest("Image file is empty".to_string()));
    }

    if image_data.len() > MAX_IMAGE_SIZE {
        return Err(AppError::BadRequest(format!(
            "Image too large. Maximum size is {} bytes ({} MB)",
            MAX_IMAGE_SIZE,
            MAX_IMAGE_SIZE / 1024 / 1024
        )));
    }

    let image_ext = extension_of(&image_name).unwrap_or("");
    if !is_image_extension_allowed(image_ext) {
        return Err(AppError::BadRequest(format!(
            "Image type '{}' is not allowed. Allowed types: {}",
            image_ext,
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )));
    }

    // Validate the audio part, if one was sent
    let audio = match audio {
        Some((audio_name, data)) => {
            if data.len() > MAX_AUDIO_SIZE {
                return Err(AppError::BadRequest(format!(
                    "Audio too large. Maximum size is {} bytes ({} MB)",
                    MAX_AUDIO_SIZE,
                    MAX_AUDIO_SIZE / 1024 / 1024
                )));
            }

            let ext = extension_of(&audio_name).unwrap_or("");
            if !is_audio_extension_allowed(ext) {
                return Err(AppError::BadRequest(format!(
                    "Audio type '{}' is not allowed. Allowed types: {}",
                    ext,
                    ALLOWED_AUDIO_EXTENSIONS.join(", ")
                )));
            }

            Some(NewAudio {
                extension: ext.to_string(),
                data,
            })
        }
        None => None,
    };

    let response = service
        .submit(NewUpload {
            name: fields.name,
            subject,
            image_data,
            audio,
            explanation: fields.explanation,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), None, None)),
    ))
}
