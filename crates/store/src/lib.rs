//! Task document store.
//!
//! This crate defines the [`TaskStore`] contract the HTTP service depends on
//! and its two backends: an in-memory map and a `PostgreSQL` table holding one
//! JSONB document per task. Backends are selected at startup by
//! [`StoreFactory`] from a [`StoreConfig`].

pub mod factory;
pub mod in_memory;
pub mod postgres;
pub mod store;

pub use factory::{ConfigurationError, FactoryError, StorageMode, StoreConfig, StoreFactory};
pub use in_memory::InMemoryTaskStore;
pub use postgres::PostgresTaskStore;
pub use store::{SharedTaskStore, StoreError, StoreFuture, TaskStore};
