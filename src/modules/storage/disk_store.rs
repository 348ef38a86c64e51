//! Local disk storage client
//!
//! Uploaded files live under a single root directory with one
//! subdirectory per subject label, e.g. `uploads/Phy./`.
//! Files are served back over HTTP from the same tree.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::error::AppError;
use crate::shared::subject::Subject;

/// Disk-backed store for uploaded question files
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload root if it does not exist yet.
    pub async fn ensure_root_exists(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::StorageWrite(format!(
                "Failed to create upload root '{}': {}",
                self.root.display(),
                e
            ))
        })?;
        info!("Upload root ready at {}", self.root.display());
        Ok(())
    }

    fn subject_dir(&self, subject: Subject) -> PathBuf {
        self.root.join(subject.label())
    }

    fn file_path(&self, subject: Subject, filename: &str) -> PathBuf {
        self.subject_dir(subject).join(filename)
    }

    /// Write a file into the subject's directory, creating the directory
    /// on first use. An existing file with the same name is overwritten.
    pub async fn save(
        &self,
        subject: Subject,
        filename: &str,
        data: &[u8],
    ) -> Result<(), AppError> {
        let dir = self.subject_dir(subject);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::StorageWrite(format!(
                "Failed to create subject directory '{}': {}",
                dir.display(),
                e
            ))
        })?;

        let path = self.file_path(subject, filename);
        tokio::fs::write(&path, data).await.map_err(|e| {
            AppError::StorageWrite(format!("Failed to write '{}': {}", path.display(), e))
        })?;

        debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    pub async fn exists(&self, subject: Subject, filename: &str) -> bool {
        tokio::fs::try_exists(self.file_path(subject, filename))
            .await
            .unwrap_or(false)
    }

    pub async fn remove(&self, subject: Subject, filename: &str) -> Result<(), AppError> {
        let path = self.file_path(subject, filename);
        tokio::fs::remove_file(&path).await.map_err(|e| {
            AppError::StorageWrite(format!("Failed to remove '{}': {}", path.display(), e))
        })
    }

    /// Whether the subject has a directory under the root. Directories
    /// appear on first upload, so this doubles as "has ever had uploads".
    pub async fn subject_dir_exists(&self, subject: Subject) -> bool {
        tokio::fs::try_exists(self.subject_dir(subject))
            .await
            .unwrap_or(false)
    }

    /// Public URL under which a stored file is served.
    pub fn public_url(&self, subject: Subject, filename: &str) -> String {
        format!("/uploads/{}/{}", subject.label(), filename)
    }
}
