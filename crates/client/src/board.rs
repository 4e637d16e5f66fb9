//! Controller that runs intents against a [`TaskApi`].
//!
//! Each intent makes at most one mutating call, then re-runs the listing for
//! the active filter. There are no optimistic updates: the task sequence only
//! ever changes to what the server last returned.

use crate::api::{ClientError, TaskApi};
use crate::intent::{Command, Intent, Operation, plan};
use crate::state::{Action, ClientState, reduce};

/// Client state plus the API it talks to.
pub struct TaskBoard<A> {
    api: A,
    state: ClientState,
}

impl<A: TaskApi> TaskBoard<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ClientState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ClientState {
        &self.state
    }

    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Applies a local action that needs no request.
    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(std::mem::take(&mut self.state), action);
    }

    /// Runs `intent` to completion, including the follow-up listing.
    pub async fn run(&mut self, intent: Intent) {
        if let Intent::ChangeFilter(filter) = intent {
            self.dispatch(Action::SetFilter(filter));
        }

        let planned = match plan(&self.state, &intent) {
            Ok(planned) => planned,
            Err(error) => {
                tracing::debug!(%error, ?intent, "Intent refused");
                self.dispatch(Action::Failed(error.to_string()));
                return;
            }
        };

        if let Some(command) = planned.command
            && let Err(error) = self.execute(command).await
        {
            tracing::warn!(%error, operation = ?planned.operation, "Request failed");
            self.dispatch(Action::Failed(planned.operation.failure_message(&error)));
            return;
        }

        if planned.operation.consumes_draft() {
            self.dispatch(Action::DraftSubmitted);
        }

        if self.refresh().await
            && let Some(message) = planned.operation.success_message()
        {
            self.dispatch(Action::Succeeded(message.to_string()));
        }
    }

    /// Lists tasks for the active filter. Returns `false` if the listing
    /// failed; the previous tasks stay in place.
    async fn refresh(&mut self) -> bool {
        match self.api.list(self.state.filter).await {
            Ok(tasks) => {
                tracing::debug!(
                    count = tasks.len(),
                    filter = self.state.filter.as_str(),
                    "Tasks loaded"
                );
                self.dispatch(Action::TasksLoaded(tasks));
                true
            }
            Err(error) => {
                tracing::warn!(%error, "Listing failed");
                self.dispatch(Action::Failed(Operation::Fetch.failure_message(&error)));
                false
            }
        }
    }

    async fn execute(&self, command: Command) -> Result<(), ClientError> {
        match command {
            Command::Create(body) => self.api.create(body).await.map(drop),
            Command::Update(id, body) => self.api.update(id, body).await.map(drop),
            Command::Delete(id) => self.api.delete(id).await.map(drop),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
