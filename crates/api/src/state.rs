//! Shared handler state.

use tasktracker_store::SharedTaskStore;

/// Dependencies injected into every handler.
///
/// The store is built by the binary at startup and handed in here; handlers
/// never construct one themselves.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedTaskStore,
}

impl AppState {
    #[must_use]
    pub fn new(store: SharedTaskStore) -> Self {
        Self { store }
    }
}
