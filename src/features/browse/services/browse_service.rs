use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::browse::dtos::{BrowseUploadDto, SubjectListDto};
use crate::features::uploads::models::Upload;
use crate::modules::storage::UploadStore;
use crate::shared::subject::Subject;

/// Service for the read side: subject listings and the latest upload
pub struct BrowseService {
    pool: SqlitePool,
    store: Arc<UploadStore>,
}

impl BrowseService {
    pub fn new(pool: SqlitePool, store: Arc<UploadStore>) -> Self {
        Self { pool, store }
    }

    /// The full taxonomy plus the subset that is browsable right now.
    ///
    /// Browsable means the subject's folder exists on disk; stray
    /// directories under the root that match no subject are ignored.
    pub async fn subject_overview(&self) -> SubjectListDto {
        let subjects = Subject::ALL
            .iter()
            .map(|s| s.label().to_string())
            .collect();

        let mut browsable = Vec::new();
        for subject in Subject::ALL {
            if self.store.subject_dir_exists(subject).await {
                browsable.push(subject.label().to_string());
            }
        }
        browsable.sort();

        SubjectListDto {
            subjects,
            browsable,
        }
    }

    /// All uploads for a subject, newest first.
    ///
    /// Records whose files have disappeared from disk are still listed;
    /// the missing asset's URL comes back as null so the client skips
    /// rendering just that asset.
    pub async fn list_by_subject(&self, subject: Subject) -> Result<Vec<BrowseUploadDto>> {
        let records = sqlx::query_as::<_, Upload>(
            r#"
            SELECT id, name, subject, filename, explanation, audio_filename, timestamp
            FROM uploads
            WHERE subject = ?1
            ORDER BY timestamp DESC
            "#,
        )
        .bind(subject.label())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list uploads for {}: {:?}", subject, e);
            AppError::Database(e)
        })?;

        let mut uploads = Vec::with_capacity(records.len());
        for record in records {
            let image_url = if self.store.exists(subject, &record.filename).await {
                Some(self.store.public_url(subject, &record.filename))
            } else {
                debug!(
                    "Image file missing for upload {}: {}",
                    record.id, record.filename
                );
                None
            };

            let audio_url = if let Some(audio) = &record.audio_filename {
                if self.store.exists(subject, audio).await {
                    Some(self.store.public_url(subject, audio))
                } else {
                    debug!("Audio file missing for upload {}: {}", record.id, audio);
                    None
                }
            } else {
                None
            };

            uploads.push(BrowseUploadDto {
                id: record.id,
                name: record.name,
                subject: record.subject,
                filename: record.filename,
                image_url,
                audio_url,
                explanation: record.explanation,
                timestamp: record.timestamp,
            });
        }

        Ok(uploads)
    }

    /// The most recent upload across all subjects, if any.
    pub async fn latest_upload(&self) -> Result<Option<Upload>> {
        sqlx::query_as::<_, Upload>(
            r#"
            SELECT id, name, subject, filename, explanation, audio_filename, timestamp
            FROM uploads
            ORDER BY timestamp DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch latest upload: {:?}", e);
            AppError::Database(e)
        })
    }
}
