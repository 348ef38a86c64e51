//! Shared helpers for the integration tests
//!
//! Every test runs the real router (same assembly path as the binary)
//! over an in-memory SQLite database and a temp-dir upload root.

// Each test binary uses its own subset of these helpers
#![allow(dead_code)]

use std::io::Cursor;
use std::time::Duration;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use tempfile::TempDir;

use studydrop::core::config::{
    AppConfig, Config, DatabaseConfig, SessionConfig, StorageConfig, SwaggerConfig,
};
use studydrop::{build_router, AppContext};

/// One fully wired application over throwaway storage
pub struct TestApp {
    pub server: TestServer,
    pub ctx: AppContext,
    /// Owns the upload root so it outlives the test
    pub root: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let root = TempDir::new().expect("Failed to create temp upload root");
    let config = test_config(&root);

    let ctx = AppContext::new(config)
        .await
        .expect("Failed to build app context");

    let server = client_for(&ctx);

    TestApp { server, ctx, root }
}

/// Another browser against the same app: fresh cookie jar, shared
/// database, upload root and session store.
pub fn client_for(ctx: &AppContext) -> TestServer {
    TestServer::builder()
        .save_cookies()
        .build(build_router(ctx))
        .expect("Failed to start test server")
}

fn test_config(root: &TempDir) -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        database: DatabaseConfig {
            // A single pooled connection keeps the in-memory database
            // alive and shared for the whole test
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout_secs: 5,
            busy_timeout_ms: 5000,
        },
        storage: StorageConfig {
            root: root.path().to_path_buf(),
        },
        session: SessionConfig {
            idle_ttl: Duration::from_secs(1800),
            sweep_interval: Duration::from_secs(60),
        },
        swagger: SwaggerConfig {
            title: "StudyDrop API".to_string(),
            version: "0.1.0".to_string(),
            description: "API documentation for StudyDrop".to_string(),
        },
    }
}

/// A tiny valid PNG
pub fn tiny_png() -> Vec<u8> {
    encode_image(image::ImageFormat::Png)
}

/// A tiny valid JPEG
pub fn tiny_jpeg() -> Vec<u8> {
    encode_image(image::ImageFormat::Jpeg)
}

fn encode_image(format: image::ImageFormat) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 30, 90]));
    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, format)
        .expect("Failed to encode test image");
    bytes.into_inner()
}

/// Minimal valid upload form; callers chain extra parts onto it
pub fn upload_form(name: &str, subject: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("name", name)
        .add_text("subject", subject)
        .add_part(
            "image",
            Part::bytes(tiny_png())
                .file_name("question.png")
                .mime_type("image/png"),
        )
}
