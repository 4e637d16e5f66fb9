use std::sync::Arc;

use axum::http::{Method, StatusCode};
use rstest::rstest;

use tasktracker_domain::TaskId;
use tasktracker_store::StoreError;

use crate::helpers::{FailingTaskStore, TestApp};

fn failing_app() -> TestApp {
    TestApp::with_store(Arc::new(FailingTaskStore::new(StoreError::Database(
        "relation \"tasks\" does not exist".to_string(),
    ))))
}

#[rstest]
#[case(Method::GET, "/api/tasks".to_string(), None)]
#[case(Method::POST, "/api/tasks".to_string(), Some(r#"{"title":"x"}"#))]
#[case(Method::GET, format!("/api/tasks/{}", TaskId::generate()), None)]
#[case(
    Method::PATCH,
    format!("/api/tasks/{}", TaskId::generate()),
    Some(r#"{"status":"completed"}"#)
)]
#[case(Method::DELETE, format!("/api/tasks/{}", TaskId::generate()), None)]
#[tokio::test]
async fn test_store_failure_is_opaque_500(
    #[case] method: Method,
    #[case] uri: String,
    #[case] body: Option<&str>,
) {
    let app = failing_app();

    let (status, error) = app.send(method, &uri, body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["code"], "INTERNAL_ERROR");
    assert!(!error["message"].as_str().unwrap().contains("relation"));
}

#[rstest]
#[tokio::test]
async fn test_validation_happens_before_store_access() {
    let app = failing_app();

    let (status, _) = app
        .send(Method::POST, "/api/tasks", Some(r#"{"title":" "}"#))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[tokio::test]
async fn test_health_does_not_touch_store() {
    let app = failing_app();
    let (status, health) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
}
