use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response DTO for the subject overview
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubjectListDto {
    /// The full taxonomy in upload-form order
    #[schema(example = json!(["Phy.", "Chem.", "Bio.", "HM", "Bang.", "ICT", "Eng."]))]
    pub subjects: Vec<String>,
    /// Subjects that have a folder on disk, sorted lexicographically
    #[schema(example = json!(["Bang.", "Phy."]))]
    pub browsable: Vec<String>,
}

/// Response DTO for one upload in a subject listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BrowseUploadDto {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub filename: String,
    /// URL of the stored image; null when the file is gone from disk
    pub image_url: Option<String>,
    /// URL of the voice note; null when absent or gone from disk
    pub audio_url: Option<String>,
    pub explanation: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// What a fired notification announces
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationDto {
    pub name: String,
    pub subject: String,
    pub timestamp: DateTime<Utc>,
}

/// Response DTO for the notification poll
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PollResponseDto {
    /// True exactly once per session: the first poll that sees an upload
    /// newer than the session start
    pub new_upload: bool,
    /// Populated only when `new_upload` is true
    pub latest: Option<NotificationDto>,
}
