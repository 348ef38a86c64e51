//! Integration tests for the browse side: subject overview, per-subject
//! listings and the session-recorded selection.

mod common;

use serde_json::{json, Value};

use common::{spawn_app, upload_form};

#[tokio::test]
async fn test_subject_overview_lists_full_taxonomy() {
    let app = spawn_app().await;

    let res = app.server.get("/api/subjects").await;
    assert_eq!(res.status_code(), 200);

    let body: Value = res.json();
    assert_eq!(
        body["data"]["subjects"],
        json!(["Phy.", "Chem.", "Bio.", "HM", "Bang.", "ICT", "Eng."])
    );
    // Nothing uploaded yet, so nothing is browsable
    assert_eq!(body["data"]["browsable"], json!([]));
}

#[tokio::test]
async fn test_browsable_subjects_reflect_upload_dirs_sorted() {
    let app = spawn_app().await;

    app.server
        .post("/api/uploads")
        .multipart(upload_form("Rafi", "Phy."))
        .await;
    app.server
        .post("/api/uploads")
        .multipart(upload_form("Mim", "Bang."))
        .await;

    let res = app.server.get("/api/subjects").await;
    let body: Value = res.json();
    assert_eq!(body["data"]["browsable"], json!(["Bang.", "Phy."]));
}

#[tokio::test]
async fn test_stray_directories_are_not_browsable() {
    let app = spawn_app().await;

    // A directory under the root that matches no subject label
    std::fs::create_dir(app.root.path().join("Astronomy")).unwrap();

    let res = app.server.get("/api/subjects").await;
    let body: Value = res.json();
    assert_eq!(body["data"]["browsable"], json!([]));
}

#[tokio::test]
async fn test_subject_listing_is_newest_first() {
    let app = spawn_app().await;

    app.server
        .post("/api/uploads")
        .multipart(upload_form("First", "Phy."))
        .await;
    app.server
        .post("/api/uploads")
        .multipart(upload_form("Second", "Phy."))
        .await;

    let res = app.server.get("/api/subjects/Phy./uploads").await;
    assert_eq!(res.status_code(), 200);

    let body: Value = res.json();
    assert_eq!(body["meta"]["total"], 2);

    let records = body["data"].as_array().unwrap();
    assert_eq!(records[0]["name"], "Second");
    assert_eq!(records[1]["name"], "First");
}

#[tokio::test]
async fn test_listing_excludes_other_subjects() {
    let app = spawn_app().await;

    app.server
        .post("/api/uploads")
        .multipart(upload_form("Rafi", "Phy."))
        .await;
    app.server
        .post("/api/uploads")
        .multipart(upload_form("Mim", "Chem."))
        .await;

    let res = app.server.get("/api/subjects/Chem./uploads").await;
    let body: Value = res.json();
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Mim");
    assert_eq!(records[0]["subject"], "Chem.");
}

#[tokio::test]
async fn test_unknown_subject_is_404() {
    let app = spawn_app().await;

    let res = app.server.get("/api/subjects/Math/uploads").await;
    assert_eq!(res.status_code(), 404);

    let body: Value = res.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_missing_file_nulls_url_but_keeps_record() {
    let app = spawn_app().await;

    let res = app
        .server
        .post("/api/uploads")
        .multipart(upload_form("Rafi", "Phy."))
        .await;
    let body: Value = res.json();
    let filename = body["data"]["filename"].as_str().unwrap().to_string();

    // Someone deleted the file from disk behind the app's back
    std::fs::remove_file(app.root.path().join("Phy.").join(&filename)).unwrap();

    let res = app.server.get("/api/subjects/Phy./uploads").await;
    assert_eq!(res.status_code(), 200);

    let body: Value = res.json();
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["filename"], filename.as_str());
    assert_eq!(records[0]["image_url"], Value::Null);
}

#[tokio::test]
async fn test_browsing_records_selection_in_session() {
    let app = spawn_app().await;

    app.server
        .post("/api/uploads")
        .multipart(upload_form("Rafi", "Bio."))
        .await;

    app.server.get("/api/subjects/Bio./uploads").await;

    let res = app.server.get("/api/session").await;
    let body: Value = res.json();
    assert_eq!(body["data"]["selected_subject"], "Bio.");
}

#[tokio::test]
async fn test_health_check_responds_ok_without_session() {
    let app = spawn_app().await;

    let res = app.server.get("/health").await;
    assert_eq!(res.status_code(), 200);
    // Health sits outside the session layer, so no cookie is issued
    assert!(res.maybe_cookie("sid").is_none());
}

#[tokio::test]
async fn test_embedded_page_and_script_are_served() {
    let app = spawn_app().await;

    let res = app.server.get("/").await;
    assert_eq!(res.status_code(), 200);
    let page = res.text();
    assert!(page.contains("StudyDrop"));
    assert!(page.contains("/static/app.js"));

    let res = app.server.get("/static/app.js").await;
    assert_eq!(res.status_code(), 200);
    assert!(res
        .header("content-type")
        .to_str()
        .unwrap()
        .contains("javascript"));
    assert!(res.text().contains("pollNotifications"));
}
