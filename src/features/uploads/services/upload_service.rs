use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::{NewUpload, UploadResponseDto};
use crate::features::uploads::models::Upload;
use crate::features::uploads::services::image;
use crate::modules::storage::UploadStore;
use crate::shared::subject::Subject;
use crate::shared::validation::sanitize_filename_component;

/// Service for storing uploaded questions
pub struct UploadService {
    pool: SqlitePool,
    store: Arc<UploadStore>,
}

impl UploadService {
    pub fn new(pool: SqlitePool, store: Arc<UploadStore>) -> Self {
        Self { pool, store }
    }

    /// Store a validated submission: files first, then the metadata row.
    ///
    /// The image is re-encoded to PNG before anything is written, so a
    /// corrupt upload fails with no side effects. If the metadata insert
    /// fails after the files were written, the files are removed again
    /// on a best-effort basis.
    pub async fn submit(&self, upload: NewUpload) -> Result<UploadResponseDto> {
        // One clock read per submission. The stored timestamp keeps full
        // precision; the filename embeds it truncated to seconds, so two
        // same-name submissions within a second share a filename and the
        // later write wins.
        let submitted_at = Utc::now();
        let stem = derive_stem(&upload.name, submitted_at);
        let image_filename = format!("{}.png", stem);

        let png = image::reencode_png(upload.image_data).await?;

        self.store
            .save(upload.subject, &image_filename, &png)
            .await?;

        let mut audio_filename = None;
        if let Some(audio) = &upload.audio {
            let filename = format!("{}_audio.{}", stem, audio.extension);
            if let Err(e) = self.store.save(upload.subject, &filename, &audio.data).await {
                self.cleanup_after_failure(upload.subject, &image_filename, None)
                    .await;
                return Err(e);
            }
            audio_filename = Some(filename);
        }

        let record = Upload {
            id: Uuid::new_v4().to_string(),
            name: upload.name,
            subject: upload.subject.label().to_string(),
            filename: image_filename,
            explanation: upload.explanation,
            audio_filename,
            timestamp: submitted_at,
        };

        if let Err(e) = self.insert(&record).await {
            self.cleanup_after_failure(
                upload.subject,
                &record.filename,
                record.audio_filename.as_deref(),
            )
            .await;
            return Err(e);
        }

        info!(
            "Upload stored: id={}, subject={}, filename={}",
            record.id, record.subject, record.filename
        );

        Ok(self.to_response(record, upload.subject))
    }

    async fn insert(&self, record: &Upload) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO uploads (id, name, subject, filename, explanation, audio_filename, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.subject)
        .bind(&record.filename)
        .bind(&record.explanation)
        .bind(&record.audio_filename)
        .bind(record.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert upload record: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(())
    }

    /// Remove files written before a failed insert. Failures here are
    /// logged and swallowed; the caller's error is the one that matters.
    async fn cleanup_after_failure(&self, subject: Subject, image: &str, audio: Option<&str>) {
        if let Err(e) = self.store.remove(subject, image).await {
            warn!("Failed to clean up '{}' after aborted upload: {}", image, e);
        }
        if let Some(audio) = audio {
            if let Err(e) = self.store.remove(subject, audio).await {
                warn!("Failed to clean up '{}' after aborted upload: {}", audio, e);
            }
        }
    }

    fn to_response(&self, record: Upload, subject: Subject) -> UploadResponseDto {
        let image_url = self.store.public_url(subject, &record.filename);
        let audio_url = record
            .audio_filename
            .as_deref()
            .map(|f| self.store.public_url(subject, f));

        UploadResponseDto {
            id: record.id,
            name: record.name,
            subject: record.subject,
            filename: record.filename,
            image_url,
            audio_filename: record.audio_filename,
            audio_url,
            explanation: record.explanation,
            timestamp: record.timestamp,
        }
    }
}

/// Filename stem for a submission: sanitized name plus the submission
/// time at second precision.
pub(crate) fn derive_stem(name: &str, submitted_at: DateTime<Utc>) -> String {
    format!(
        "{}_{}",
        sanitize_filename_component(name),
        submitted_at.format("%Y%m%d%H%M%S")
    )
}
