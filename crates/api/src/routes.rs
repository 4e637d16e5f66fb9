//! Routing definitions for the task API.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

// =============================================================================
// Router Creation
// =============================================================================

/// Creates the API router with all routes and middleware.
///
/// | Method | Path | Handler |
/// |---|---|---|
/// | GET | `/health` | [`handlers::health_check`] |
/// | POST | `/api/tasks` | [`handlers::create_task`] |
/// | GET | `/api/tasks` | [`handlers::list_tasks`] |
/// | GET | `/api/tasks/{id}` | [`handlers::get_task`] |
/// | PATCH | `/api/tasks/{id}` | [`handlers::update_task`] |
/// | DELETE | `/api/tasks/{id}` | [`handlers::delete_task`] |
///
/// # Examples
///
/// ```ignore
/// let router = create_router(AppState::new(store));
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router(state: AppState) -> Router {
    let tasks = Router::new()
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/tasks/{id}",
            get(handlers::get_task)
                .patch(handlers::update_task)
                .delete(handlers::delete_task),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", tasks)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

/// Any origin, method and header.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

// =============================================================================
// Tests
// =============================================================================
