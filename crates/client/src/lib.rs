//! Terminal client for the task tracker.
//!
//! The client keeps a [`ClientState`] that only the [`reduce`] function
//! changes. User intents are planned into single API calls by
//! [`intent::plan`] and run by [`TaskBoard`], which always re-lists from the
//! server afterwards. [`view`] draws the state with ratatui.

pub mod api;
pub mod board;
pub mod config;
pub mod intent;
pub mod state;
pub mod view;

pub use api::{ClientError, CreateTaskBody, HttpTaskApi, TaskApi, UpdateTaskBody};
pub use board::TaskBoard;
pub use config::ClientConfig;
pub use intent::{Intent, PlanError};
pub use state::{Action, ClientState, Draft, Notice, Severity, reduce};
