#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use futures::future::{BoxFuture, FutureExt};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use tasktracker_api::{AppState, create_router};
use tasktracker_domain::{NewTask, Task, TaskId, TaskPatch, TaskStatus};
use tasktracker_store::{InMemoryTaskStore, StoreError, StoreFuture, TaskStore};

// =============================================================================
// Test Application
// =============================================================================

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryTaskStore::new()))
    }

    pub fn with_store(store: Arc<dyn TaskStore + Send + Sync>) -> Self {
        Self {
            router: create_router(AppState::new(store)),
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn create(&self, body: &str) -> Value {
        let (status, json) = self.send(Method::POST, "/api/tasks", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
        json
    }

    pub async fn list(&self, query: &str) -> Vec<Value> {
        let (status, json) = self
            .send(Method::GET, &format!("/api/tasks{query}"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        json.as_array().cloned().unwrap()
    }

    pub async fn get(&self, id: &str) -> (StatusCode, Value) {
        self.send(Method::GET, &format!("/api/tasks/{id}"), None).await
    }

    pub async fn patch(&self, id: &str, body: &str) -> (StatusCode, Value) {
        self.send(Method::PATCH, &format!("/api/tasks/{id}"), Some(body))
            .await
    }

    pub async fn delete(&self, id: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, &format!("/api/tasks/{id}"), None)
            .await
    }
}

pub fn id_of(task: &Value) -> String {
    task["id"].as_str().unwrap().to_string()
}

pub fn ids_of(tasks: &[Value]) -> Vec<String> {
    tasks.iter().map(id_of).collect()
}

// =============================================================================
// Failing Store
// =============================================================================

/// Store whose every operation fails with the configured error.
pub struct FailingTaskStore {
    error: StoreError,
}

impl FailingTaskStore {
    pub fn new(error: StoreError) -> Self {
        Self { error }
    }

    fn fail<T: Send + 'static>(&self) -> StoreFuture<T> {
        let error = self.error.clone();
        async move { Err(error) }.boxed()
    }
}

impl TaskStore for FailingTaskStore {
    fn initialize(&self) -> StoreFuture<()> {
        self.fail()
    }

    fn insert(&self, _new_task: NewTask) -> StoreFuture<Task> {
        self.fail()
    }

    fn find_all(&self, _status: Option<TaskStatus>) -> StoreFuture<Vec<Task>> {
        self.fail()
    }

    fn find_by_id(&self, _id: &TaskId) -> StoreFuture<Option<Task>> {
        self.fail()
    }

    fn update_by_id(&self, _id: &TaskId, _patch: TaskPatch) -> StoreFuture<Option<Task>> {
        self.fail()
    }

    fn delete_by_id(&self, _id: &TaskId) -> StoreFuture<Option<Task>> {
        self.fail()
    }

    fn close(&self) -> BoxFuture<'static, ()> {
        async {}.boxed()
    }
}
