use axum::http::StatusCode;
use rstest::rstest;

use tasktracker_domain::TaskId;

use crate::helpers::{TestApp, id_of};

#[rstest]
#[tokio::test]
async fn test_get_returns_created_task() {
    let app = TestApp::new();
    let created = app
        .create(r#"{"title":"Buy milk","description":"2 liters","status":"in-progress"}"#)
        .await;

    let (status, task) = app.get(&id_of(&created)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(task, created);
}

#[rstest]
#[tokio::test]
async fn test_get_unknown_identifier_is_404() {
    let app = TestApp::new();

    let (status, error) = app.get(&TaskId::generate().to_string()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "NOT_FOUND");
}

#[rstest]
#[case("not-a-task")]
#[case("507f1f77bcf86cd799439011")]
#[tokio::test]
async fn test_get_malformed_identifier_is_404(#[case] id: &str) {
    let app = TestApp::new();
    let (status, _) = app.get(id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
