use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::subject::Subject;

/// Upload request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFormDto {
    /// Uploader's name
    #[schema(example = "Rafi")]
    pub name: String,
    /// Subject label
    #[schema(example = "Phy.")]
    pub subject: String,
    /// The question image (jpg, jpeg or png; stored as PNG)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
    /// Optional voice note (mp3 or wav)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub audio: Option<String>,
    /// Optional text explanation
    pub explanation: Option<String>,
}

/// Text fields assembled from the multipart form, validated before any
/// file is touched
#[derive(Debug, Validate)]
pub struct UploadFieldsDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "subject is required"))]
    pub subject: String,
    pub explanation: Option<String>,
}

/// Response DTO for a stored upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    pub id: String,
    pub name: String,
    pub subject: String,
    /// Stored image filename, derived as `{name}_{timestamp}.png`
    pub filename: String,
    /// URL the stored image is served from
    pub image_url: String,
    pub audio_filename: Option<String>,
    pub audio_url: Option<String>,
    pub explanation: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Validated submission handed from the handler to the service
#[derive(Debug)]
pub struct NewUpload {
    pub name: String,
    pub subject: Subject,
    pub image_data: Vec<u8>,
    pub audio: Option<NewAudio>,
    pub explanation: Option<String>,
}

#[derive(Debug)]
pub struct NewAudio {
    /// Extension from the uploaded filename, kept as provided
    pub extension: String,
    pub data: Vec<u8>,
}

/// Accepted image extensions (compared case-insensitively)
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Accepted audio extensions (compared case-insensitively)
pub const ALLOWED_AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav"];

/// Maximum image size in bytes (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Maximum audio size in bytes (25MB)
pub const MAX_AUDIO_SIZE: usize = 25 * 1024 * 1024;

/// Extension of an uploaded filename, if it has one
pub fn extension_of(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

pub fn is_image_extension_allowed(extension: &str) -> bool {
    ALLOWED_IMAGE_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
}

pub fn is_audio_extension_allowed(extension: &str) -> bool {
    ALLOWED_AUDIO_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("photo.png"), Some("png"));
        assert_eq!(extension_of("voice.note.MP3"), Some("MP3"));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of("trailing."), None);
    }

    #[test]
    fn test_extension_checks_are_case_insensitive() {
        assert!(is_image_extension_allowed("JPG"));
        assert!(is_image_extension_allowed("jpeg"));
        assert!(is_image_extension_allowed("Png"));
        assert!(!is_image_extension_allowed("gif"));

        assert!(is_audio_extension_allowed("mp3"));
        assert!(is_audio_extension_allowed("WAV"));
        assert!(!is_audio_extension_allowed("ogg"));
    }
}
