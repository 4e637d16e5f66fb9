use axum::http::{Method, StatusCode};
use rstest::rstest;

use crate::helpers::{TestApp, ids_of};

async fn seeded() -> (TestApp, Vec<String>) {
    let app = TestApp::new();
    let mut ids = Vec::new();
    for body in [
        r#"{"title":"one"}"#,
        r#"{"title":"two","status":"in-progress"}"#,
        r#"{"title":"three","status":"completed"}"#,
        r#"{"title":"four"}"#,
    ] {
        ids.push(crate::helpers::id_of(&app.create(body).await));
    }
    (app, ids)
}

#[rstest]
#[tokio::test]
async fn test_list_empty() {
    let app = TestApp::new();
    assert!(app.list("").await.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_list_returns_newest_first() {
    let (app, ids) = seeded().await;

    let listed = ids_of(&app.list("").await);

    let expected: Vec<String> = ids.into_iter().rev().collect();
    assert_eq!(listed, expected);
}

#[rstest]
#[case("pending", 2)]
#[case("in-progress", 1)]
#[case("completed", 1)]
#[tokio::test]
async fn test_list_with_filter_returns_only_that_status(
    #[case] status: &str,
    #[case] count: usize,
) {
    let (app, _) = seeded().await;

    let tasks = app.list(&format!("?status={status}")).await;

    assert_eq!(tasks.len(), count);
    assert!(tasks.iter().all(|task| task["status"] == status));
}

#[rstest]
#[case("?status=")]
#[case("?status=all")]
#[case("?page=2&limit=1")]
#[tokio::test]
async fn test_list_without_effective_filter_returns_everything(#[case] query: &str) {
    let (app, ids) = seeded().await;
    assert_eq!(app.list(query).await.len(), ids.len());
}

#[rstest]
#[tokio::test]
async fn test_list_with_unknown_status_matches_nothing() {
    let (app, _) = seeded().await;
    assert!(app.list("?status=archived").await.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_list_with_repeated_status_uses_first_value() {
    let (app, _) = seeded().await;

    let (status, json) = app
        .send(Method::GET, "/api/tasks?status=pending&status=completed", None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let tasks = json.as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|task| task["status"] == "pending"));
}
