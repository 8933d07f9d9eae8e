//! Shared test doubles for controller and UI tests

#![allow(dead_code)]

use compareason::compare::{CompareRequest, CompareService};
use compareason::search::SearchState;
use compareason::SearchError;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::sync::{watch, Semaphore};

/// Comparison service that replays a fixed reply and records every request.
///
/// A gated service holds each call until [`release`](Self::release) is called,
/// which keeps the controller in its pending phase for as long as a test needs.
pub struct ScriptedService {
    reply: Result<Value, SearchError>,
    gate: Option<Semaphore>,
    requests: Mutex<Vec<CompareRequest>>,
}

impl ScriptedService {
    /// Answer every call immediately
    pub fn replying(reply: Result<Value, SearchError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            gate: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Answer only after `release`
    pub fn gated(reply: Result<Value, SearchError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            gate: Some(Semaphore::new(0)),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Let one held call complete
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CompareRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CompareService for ScriptedService {
    async fn compare(&self, request: &CompareRequest) -> Result<Value, SearchError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        self.reply.clone()
    }
}

/// Wait until the watched state satisfies `predicate`
pub async fn wait_for_state(
    rx: &mut watch::Receiver<SearchState>,
    predicate: impl Fn(&SearchState) -> bool,
) -> SearchState {
    loop {
        {
            let state = rx.borrow_and_update();
            if predicate(&state) {
                return state.clone();
            }
        }
        rx.changed().await.expect("controller dropped");
    }
}
