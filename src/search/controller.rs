use crate::compare::{CompareRequest, CompareService};
use crate::error::SearchError;
use crate::search::state::{RequestState, SearchState};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// How a call to [`SearchController::submit_search`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The attempt ran to completion (or failed validation) and its outcome is in the state.
    Finished(Result<Value, SearchError>),
    /// Another search was already pending; nothing was sent.
    Ignored,
    /// The controller was torn down; its state was left alone.
    Discarded,
}

struct Shared {
    state: watch::Sender<SearchState>,
    live: AtomicBool,
}

impl Shared {
    fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Replace a pending request with its final phase.
    fn settle(&self, next: RequestState) {
        if !self.is_live() {
            tracing::debug!(phase = next.label(), "dropping completion for torn-down controller");
            return;
        }
        self.state.send_if_modified(|state| {
            if !state.request.is_pending() {
                return false;
            }
            tracing::debug!(phase = next.label(), "search settled");
            state.request = next;
            true
        });
    }
}

/// Holds the loading flag for one in-flight search and releases it on drop.
///
/// Unless told otherwise the search settles back to `Idle`, which is what a
/// cancelled (dropped) submission leaves behind.
struct PendingGuard<'a> {
    shared: &'a Shared,
    outcome: RequestState,
}

impl<'a> PendingGuard<'a> {
    fn new(shared: &'a Shared) -> Self {
        Self {
            shared,
            outcome: RequestState::Idle,
        }
    }

    fn settle_as(&mut self, outcome: RequestState) {
        self.outcome = outcome;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let outcome = std::mem::take(&mut self.outcome);
        self.shared.settle(outcome);
    }
}

enum Start {
    Ignored,
    Rejected,
    Send(String),
}

/// Search interaction controller.
///
/// Owns the query text and the state of the last search, and drives at most
/// one request to the comparison service at a time. Cloning yields another
/// handle to the same controller, so a UI can hand one to a spawned task.
///
/// Rendering layers observe changes through [`subscribe`](Self::subscribe)
/// or poll with [`snapshot`](Self::snapshot).
#[derive(Clone)]
pub struct SearchController {
    service: Arc<dyn CompareService>,
    shared: Arc<Shared>,
}

impl SearchController {
    pub fn new(service: Arc<dyn CompareService>, initial_query: impl Into<String>) -> Self {
        let (state, _) = watch::channel(SearchState::new(initial_query));
        Self {
            service,
            shared: Arc::new(Shared {
                state,
                live: AtomicBool::new(true),
            }),
        }
    }

    /// Receive a notification after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SearchState {
        self.shared.state.borrow().clone()
    }

    pub fn query(&self) -> String {
        self.shared.state.borrow().query.clone()
    }

    /// Replace the query text. No validation happens here.
    pub fn set_query(&self, text: impl Into<String>) {
        if !self.is_live() {
            return;
        }
        let text = text.into();
        self.shared.state.send_if_modified(|state| {
            if state.query == text {
                return false;
            }
            state.query = text;
            true
        });
    }

    /// Run one search for the current query.
    ///
    /// An empty query fails immediately without touching the network. While a
    /// search is pending further calls are ignored. The loading flag is
    /// cleared on every exit path, including when this future is dropped.
    pub async fn submit_search(&self) -> Submission {
        if !self.is_live() {
            return Submission::Discarded;
        }

        let mut start = Start::Ignored;
        self.shared.state.send_if_modified(|state| {
            if state.request.is_pending() {
                return false;
            }
            if state.query.trim().is_empty() {
                state.request = RequestState::Failed(SearchError::EmptyQuery.user_message());
                start = Start::Rejected;
            } else {
                state.request = RequestState::Pending;
                start = Start::Send(state.query.clone());
            }
            true
        });

        let query = match start {
            Start::Ignored => {
                tracing::debug!("search already pending, ignoring submit");
                return Submission::Ignored;
            }
            Start::Rejected => {
                tracing::debug!("rejected empty query");
                return Submission::Finished(Err(SearchError::EmptyQuery));
            }
            Start::Send(query) => query,
        };

        let mut pending = PendingGuard::new(&self.shared);
        let request = CompareRequest::for_query(query);
        tracing::info!(query = %request.query, "search started");

        let result = self.service.compare(&request).await;

        if !self.is_live() {
            return Submission::Discarded;
        }

        match &result {
            Ok(payload) => {
                tracing::info!(query = %request.query, "search succeeded");
                pending.settle_as(RequestState::Succeeded(payload.clone()));
            }
            Err(err) => {
                tracing::warn!(query = %request.query, error = %err, "search failed");
                pending.settle_as(RequestState::Failed(err.user_message()));
            }
        }
        drop(pending);

        Submission::Finished(result)
    }

    /// Detach the controller from its view. Later completions are discarded
    /// and further calls become no-ops.
    pub fn teardown(&self) {
        if self.shared.live.swap(false, Ordering::AcqRel) {
            tracing::debug!("search controller torn down");
        }
    }

    pub fn is_live(&self) -> bool {
        self.shared.is_live()
    }
}
