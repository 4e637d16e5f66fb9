use axum::http::StatusCode;
use rstest::rstest;

use tasktracker_domain::TaskId;

use crate::helpers::{TestApp, id_of};

#[rstest]
#[tokio::test]
async fn test_delete_returns_deleted_task_then_404() {
    let app = TestApp::new();
    let created = app.create(r#"{"title":"Temporary"}"#).await;
    let id = id_of(&created);

    let (status, deleted) = app.delete(&id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, created);

    let (status, error) = app.delete(&id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "NOT_FOUND");

    assert_eq!(app.get(&id).await.0, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn test_delete_leaves_other_tasks() {
    let app = TestApp::new();
    let keep = app.create(r#"{"title":"keep"}"#).await;
    let removed = app.create(r#"{"title":"drop"}"#).await;

    app.delete(&id_of(&removed)).await;

    assert_eq!(app.list("").await, vec![keep]);
}

#[rstest]
#[tokio::test]
async fn test_delete_unknown_identifier_is_404() {
    let app = TestApp::new();
    let (status, _) = app.delete(&TaskId::generate().to_string()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
