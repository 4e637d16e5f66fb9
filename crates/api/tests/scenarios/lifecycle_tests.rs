use axum::http::StatusCode;
use rstest::rstest;

use crate::helpers::{TestApp, id_of, ids_of};

#[rstest]
#[tokio::test]
async fn test_task_moves_between_filtered_lists_until_deleted() {
    let app = TestApp::new();

    let created = app
        .create(r#"{"title":"Buy milk","status":"pending"}"#)
        .await;
    let id = id_of(&created);
    assert!(ids_of(&app.list("?status=pending").await).contains(&id));

    let (status, _) = app.patch(&id, r#"{"status":"completed"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids_of(&app.list("?status=completed").await).contains(&id));
    assert!(!ids_of(&app.list("?status=pending").await).contains(&id));

    let (status, _) = app.delete(&id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.get(&id).await.0, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn test_rejected_title_update_keeps_original_title() {
    let app = TestApp::new();
    let id = id_of(&app.create(r#"{"title":"Buy milk"}"#).await);

    let (status, _) = app.patch(&id, r#"{"title":""}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, task) = app.get(&id).await;
    assert_eq!(task["title"], "Buy milk");
}

#[rstest]
#[tokio::test]
async fn test_toggling_back_and_forth() {
    let app = TestApp::new();
    let id = id_of(&app.create(r#"{"title":"Toggle"}"#).await);

    for expected in ["completed", "pending", "completed"] {
        let body = format!(r#"{{"status":"{expected}"}}"#);
        let (_, task) = app.patch(&id, &body).await;
        assert_eq!(task["status"], expected);
    }
}
