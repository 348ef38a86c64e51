use std::io::Cursor;

use image::ImageFormat;

use crate::core::error::{AppError, Result};

/// Decode an uploaded image and re-encode it as PNG.
///
/// Every stored image is PNG regardless of the uploaded format, so the
/// browse side never has to care about extensions. Decoding also proves
/// the bytes really are an image before anything hits the disk.
///
/// Runs on the blocking pool; PNG encoding of a large photo is CPU work.
pub async fn reencode_png(data: Vec<u8>) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || {
        let img = image::load_from_memory(&data)
            .map_err(|e| AppError::Validation(format!("Could not decode image: {}", e)))?;

        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png)
            .map_err(|e| AppError::Internal(format!("Could not encode PNG: {}", e)))?;

        Ok(out.into_inner())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Image encoding task failed: {}", e)))?
}
