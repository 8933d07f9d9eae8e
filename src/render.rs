use crate::search::{RequestState, SearchState};
use serde_json::Value;

/// What the result area should show for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Nothing has been searched yet.
    Nothing,
    /// A search is in flight.
    Busy,
    /// Pretty-printed response body.
    Payload(String),
    /// Plain-text error message.
    Error(String),
}

/// Serialize a response body with two-space indentation, keeping the
/// service's key order.
pub fn render_payload(payload: &Value) -> String {
    // Serializing a `Value` cannot fail; fall back to compact output anyway.
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}

pub fn render_state(state: &SearchState) -> Rendered {
    match &state.request {
        RequestState::Idle => Rendered::Nothing,
        RequestState::Pending => Rendered::Busy,
        RequestState::Succeeded(payload) => Rendered::Payload(render_payload(payload)),
        RequestState::Failed(message) => Rendered::Error(message.clone()),
    }
}
