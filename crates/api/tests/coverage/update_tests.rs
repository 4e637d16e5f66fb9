use axum::http::StatusCode;
use rstest::rstest;

use tasktracker_domain::TaskId;

use crate::helpers::{TestApp, id_of};

#[rstest]
#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let app = TestApp::new();
    let created = app
        .create(r#"{"title":"Buy milk","description":"2 liters"}"#)
        .await;
    let id = id_of(&created);

    let (status, updated) = app.patch(&id, r#"{"status":"completed"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "completed");
    assert_eq!(updated["title"], "Buy milk");
    assert_eq!(updated["description"], "2 liters");
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(app.get(&id).await.1, updated);
}

#[rstest]
#[tokio::test]
async fn test_update_all_allowed_fields() {
    let app = TestApp::new();
    let id = id_of(&app.create(r#"{"title":"Draft"}"#).await);

    let (status, updated) = app
        .patch(
            &id,
            r#"{"title":"Final","description":"done","status":"in-progress"}"#,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Final");
    assert_eq!(updated["description"], "done");
    assert_eq!(updated["status"], "in-progress");
}

#[rstest]
#[tokio::test]
async fn test_update_with_empty_body_returns_task_unchanged() {
    let app = TestApp::new();
    let created = app.create(r#"{"title":"Same"}"#).await;

    let (status, task) = app.patch(&id_of(&created), "{}").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(task, created);
}

#[rstest]
#[case(r#"{"id":"00000000-0000-0000-0000-000000000000"}"#)]
#[case(r#"{"createdAt":"2020-01-01T00:00:00Z"}"#)]
#[case(r#"{"status":"completed","priority":"high"}"#)]
#[tokio::test]
async fn test_update_with_key_outside_allow_list_is_rejected(#[case] body: &str) {
    let app = TestApp::new();
    let created = app.create(r#"{"title":"Keep me"}"#).await;
    let id = id_of(&created);

    let (status, error) = app.patch(&id, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert_eq!(app.get(&id).await.1, created);
}

#[rstest]
#[case(r#"{"title":""}"#)]
#[case(r#"{"title":"  "}"#)]
#[case(r#"{"title":null}"#)]
#[tokio::test]
async fn test_update_with_blank_title_keeps_original(#[case] body: &str) {
    let app = TestApp::new();
    let id = id_of(&app.create(r#"{"title":"Original"}"#).await);

    let (status, error) = app.patch(&id, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"][0]["field"], "title");
    assert_eq!(app.get(&id).await.1["title"], "Original");
}

#[rstest]
#[tokio::test]
async fn test_update_with_invalid_status_is_400() {
    let app = TestApp::new();
    let id = id_of(&app.create(r#"{"title":"x"}"#).await);

    let (status, _) = app.patch(&id, r#"{"status":"done"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.get(&id).await.1["status"], "pending");
}

#[rstest]
#[tokio::test]
async fn test_update_unknown_identifier_is_404() {
    let app = TestApp::new();

    let (status, error) = app
        .patch(&TaskId::generate().to_string(), r#"{"status":"completed"}"#)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "NOT_FOUND");
}

#[rstest]
#[tokio::test]
async fn test_update_validates_body_before_identifier() {
    let app = TestApp::new();
    let (status, _) = app.patch("missing", r#"{"owner":"me"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
