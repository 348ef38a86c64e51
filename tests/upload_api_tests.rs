//! Integration tests for the upload endpoint: multipart validation,
//! file placement under the subject folder and the metadata row.

mod common;

use axum_test::multipart::{MultipartForm, Part};
use serde_json::Value;

use common::{spawn_app, tiny_jpeg, tiny_png, upload_form};
use studydrop::features::uploads::dtos::MAX_IMAGE_SIZE;

#[tokio::test]
async fn test_submit_upload_stores_file_and_record() {
    let app = spawn_app().await;

    let res = app
        .server
        .post("/api/uploads")
        .multipart(upload_form("Rafi", "Phy."))
        .await;

    assert_eq!(res.status_code(), 201);
    let body: Value = res.json();
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["name"], "Rafi");
    assert_eq!(data["subject"], "Phy.");
    assert_eq!(data["audio_filename"], Value::Null);
    assert_eq!(data["audio_url"], Value::Null);

    let filename = data["filename"].as_str().unwrap();
    assert!(filename.starts_with("Rafi_"), "got {}", filename);
    assert!(filename.ends_with(".png"), "got {}", filename);
    assert_eq!(
        data["image_url"],
        format!("/uploads/Phy./{}", filename).as_str()
    );

    // File landed under the subject folder
    assert!(app.root.path().join("Phy.").join(filename).exists());

    // And exactly one metadata row exists
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM uploads")
        .fetch_one(&app.ctx.pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[tokio::test]
async fn test_stored_file_is_served_back() {
    let app = spawn_app().await;

    let res = app
        .server
        .post("/api/uploads")
        .multipart(upload_form("Rafi", "Phy."))
        .await;
    let body: Value = res.json();
    let image_url = body["data"]["image_url"].as_str().unwrap().to_string();

    let file_res = app.server.get(&image_url).await;
    assert_eq!(file_res.status_code(), 200);
    assert!(!file_res.as_bytes().is_empty());
}

#[tokio::test]
async fn test_missing_name_is_rejected() {
    let app = spawn_app().await;

    let form = MultipartForm::new().add_text("subject", "Phy.").add_part(
        "image",
        Part::bytes(tiny_png())
            .file_name("q.png")
            .mime_type("image/png"),
    );

    let res = app.server.post("/api/uploads").multipart(form).await;
    assert_eq!(res.status_code(), 400);
    let body: Value = res.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_unknown_subject_is_rejected() {
    let app = spawn_app().await;

    let res = app
        .server
        .post("/api/uploads")
        .multipart(upload_form("Rafi", "Math"))
        .await;

    assert_eq!(res.status_code(), 400);
    let body: Value = res.json();
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Math"), "got {}", message);
}

#[tokio::test]
async fn test_missing_image_is_rejected() {
    let app = spawn_app().await;

    let form = MultipartForm::new()
        .add_text("name", "Rafi")
        .add_text("subject", "Phy.");

    let res = app.server.post("/api/uploads").multipart(form).await;
    assert_eq!(res.status_code(), 400);
}

#[tokio::test]
async fn test_disallowed_image_extension_is_rejected() {
    let app = spawn_app().await;

    let form = MultipartForm::new()
        .add_text("name", "Rafi")
        .add_text("subject", "Phy.")
        .add_part(
            "image",
            Part::bytes(tiny_png())
                .file_name("q.gif")
                .mime_type("image/gif"),
        );

    let res = app.server.post("/api/uploads").multipart(form).await;
    assert_eq!(res.status_code(), 400);
}

#[tokio::test]
async fn test_undecodable_image_is_rejected_without_side_effects() {
    let app = spawn_app().await;

    // Named .png but the bytes are garbage
    let form = MultipartForm::new()
        .add_text("name", "Rafi")
        .add_text("subject", "Phy.")
        .add_part(
            "image",
            Part::bytes(vec![0u8; 64])
                .file_name("q.png")
                .mime_type("image/png"),
        );

    let res = app.server.post("/api/uploads").multipart(form).await;
    assert_eq!(res.status_code(), 400);

    // Nothing was written and nothing was recorded
    assert!(!app.root.path().join("Phy.").exists());
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM uploads")
        .fetch_one(&app.ctx.pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[tokio::test]
async fn test_oversized_image_is_rejected() {
    let app = spawn_app().await;

    let form = MultipartForm::new()
        .add_text("name", "Rafi")
        .add_text("subject", "Phy.")
        .add_part(
            "image",
            Part::bytes(vec![0u8; MAX_IMAGE_SIZE + 1])
                .file_name("q.png")
                .mime_type("image/png"),
        );

    let res = app.server.post("/api/uploads").multipart(form).await;
    assert_eq!(res.status_code(), 400);
}

#[tokio::test]
async fn test_audio_is_stored_alongside_image() {
    let app = spawn_app().await;

    let form = upload_form("Rafi", "Chem.").add_part(
        "audio",
        Part::bytes(vec![1u8, 2, 3, 4])
            .file_name("note.mp3")
            .mime_type("audio/mpeg"),
    );

    let res = app.server.post("/api/uploads").multipart(form).await;
    assert_eq!(res.status_code(), 201);

    let body: Value = res.json();
    let data = &body["data"];
    let audio_filename = data["audio_filename"].as_str().unwrap();
    assert!(audio_filename.ends_with("_audio.mp3"), "got {}", audio_filename);
    assert_eq!(
        data["audio_url"],
        format!("/uploads/Chem./{}", audio_filename).as_str()
    );

    assert!(app.root.path().join("Chem.").join(audio_filename).exists());
}

#[tokio::test]
async fn test_disallowed_audio_extension_is_rejected() {
    let app = spawn_app().await;

    let form = upload_form("Rafi", "Chem.").add_part(
        "audio",
        Part::bytes(vec![1u8, 2, 3, 4])
            .file_name("note.ogg")
            .mime_type("audio/ogg"),
    );

    let res = app.server.post("/api/uploads").multipart(form).await;
    assert_eq!(res.status_code(), 400);

    // The image must not be left behind when the audio is rejected
    assert!(!app.root.path().join("Chem.").exists());
}

#[tokio::test]
async fn test_jpeg_uploads_are_stored_as_png() {
    let app = spawn_app().await;

    let form = MultipartForm::new()
        .add_text("name", "Rafi")
        .add_text("subject", "Bio.")
        .add_part(
            "image",
            Part::bytes(tiny_jpeg())
                .file_name("q.jpg")
                .mime_type("image/jpeg"),
        );

    let res = app.server.post("/api/uploads").multipart(form).await;
    assert_eq!(res.status_code(), 201);

    let body: Value = res.json();
    let filename = body["data"]["filename"].as_str().unwrap();
    assert!(filename.ends_with(".png"));

    let stored = std::fs::read(app.root.path().join("Bio.").join(filename)).unwrap();
    assert_eq!(
        image::guess_format(&stored).unwrap(),
        image::ImageFormat::Png
    );
}

#[tokio::test]
async fn test_blank_explanation_is_stored_as_null() {
    let app = spawn_app().await;

    let form = upload_form("Rafi", "Phy.").add_text("explanation", "   ");

    let res = app.server.post("/api/uploads").multipart(form).await;
    assert_eq!(res.status_code(), 201);

    let body: Value = res.json();
    assert_eq!(body["data"]["explanation"], Value::Null);
}

#[tokio::test]
async fn test_explanation_is_trimmed_and_kept() {
    let app = spawn_app().await;

    let form = upload_form("Rafi", "Phy.").add_text("explanation", "  Use F = ma here.  ");

    let res = app.server.post("/api/uploads").multipart(form).await;
    assert_eq!(res.status_code(), 201);

    let body: Value = res.json();
    assert_eq!(body["data"]["explanation"], "Use F = ma here.");
}

#[tokio::test]
async fn test_path_separators_in_name_cannot_escape_subject_dir() {
    let app = spawn_app().await;

    let res = app
        .server
        .post("/api/uploads")
        .multipart(upload_form("../escape", "Phy."))
        .await;

    assert_eq!(res.status_code(), 201);
    let body: Value = res.json();

    // The displayed name keeps what was typed; the filename does not
    assert_eq!(body["data"]["name"], "../escape");
    let filename = body["data"]["filename"].as_str().unwrap();
    assert!(filename.starts_with(".._escape_"), "got {}", filename);
    assert!(app.root.path().join("Phy.").join(filename).exists());
}
