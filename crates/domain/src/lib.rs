//! Domain model for the task tracker.
//!
//! Everything in this crate is pure: identifiers and timestamps are generated
//! only through the explicit `generate`/`now` constructors, which callers
//! invoke at their I/O boundary.

pub mod filter;
pub mod status;
pub mod task;
pub mod title;

pub use filter::StatusFilter;
pub use status::{TaskStatus, UnknownStatus};
pub use task::{NewTask, Task, TaskId, TaskIdError, TaskPatch, Timestamp};
pub use title::{Title, TitleError};
