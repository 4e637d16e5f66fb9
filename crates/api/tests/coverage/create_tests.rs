use axum::http::{Method, StatusCode};
use rstest::rstest;

use crate::helpers::TestApp;

#[rstest]
#[tokio::test]
async fn test_create_assigns_identifier_and_defaults() {
    let app = TestApp::new();

    let (status, task) = app
        .send(Method::POST, "/api/tasks", Some(r#"{"title":"Buy milk"}"#))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["description"], "");
    assert_eq!(task["status"], "pending");
    assert!(task["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(task["createdAt"].is_string());
}

#[rstest]
#[tokio::test]
async fn test_create_twice_yields_distinct_identifiers() {
    let app = TestApp::new();

    let first = app.create(r#"{"title":"a"}"#).await;
    let second = app.create(r#"{"title":"a"}"#).await;

    assert_ne!(first["id"], second["id"]);
}

#[rstest]
#[tokio::test]
async fn test_create_keeps_description_and_status() {
    let app = TestApp::new();

    let task = app
        .create(r#"{"title":"Write report","description":"Q3","status":"in-progress"}"#)
        .await;

    assert_eq!(task["description"], "Q3");
    assert_eq!(task["status"], "in-progress");
}

#[rstest]
#[tokio::test]
async fn test_create_trims_title() {
    let app = TestApp::new();
    let task = app.create(r#"{"title":"  Buy milk  "}"#).await;
    assert_eq!(task["title"], "Buy milk");
}

#[rstest]
#[case(r#"{"title":""}"#)]
#[case(r#"{"title":"   "}"#)]
#[case(r#"{"title":null}"#)]
#[case(r#"{"description":"no title"}"#)]
#[tokio::test]
async fn test_create_without_title_is_rejected_and_persists_nothing(#[case] body: &str) {
    let app = TestApp::new();

    let (status, error) = app.send(Method::POST, "/api/tasks", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert_eq!(error["message"], "Title is required");
    assert_eq!(error["details"][0]["field"], "title");
    assert!(app.list("").await.is_empty());
}

#[rstest]
#[case(r#"{"title":"a","status":"archived"}"#)]
#[case(r#"{"title":42}"#)]
#[case(r#"{"title":"a""#)]
#[case("[]")]
#[tokio::test]
async fn test_create_with_malformed_body_is_400(#[case] body: &str) {
    let app = TestApp::new();

    let (status, error) = app.send(Method::POST, "/api/tasks", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["code"].is_string());
    assert!(app.list("").await.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_create_without_content_type_is_400() {
    let app = TestApp::new();

    let (status, error) = app.send(Method::POST, "/api/tasks", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_CONTENT_TYPE");
}
