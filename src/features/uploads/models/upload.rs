use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for an uploaded question
#[derive(Debug, Clone, FromRow)]
pub struct Upload {
    pub id: String,
    /// Uploader's name as entered (trimmed, otherwise untouched)
    pub name: String,
    /// Subject label, matching the on-disk folder name
    pub subject: String,
    /// Image filename inside the subject folder, always `.png`
    pub filename: String,
    pub explanation: Option<String>,
    pub audio_filename: Option<String>,
    /// Submission instant; the filename embeds this truncated to seconds
    pub timestamp: DateTime<Utc>,
}
