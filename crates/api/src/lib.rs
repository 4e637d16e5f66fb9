//! HTTP API for the task tracker.
//!
//! Five REST operations on `/api/tasks` translate one-to-one into
//! [`TaskStore`](tasktracker_store::TaskStore) calls. The store is injected
//! through [`state::AppState`]; the router never picks a backend itself.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiErrorResponse, FieldError, ValidationError};
pub use routes::create_router;
pub use server::{Server, ServerConfig, ServerConfigError};
pub use state::AppState;
