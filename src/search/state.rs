use serde_json::Value;

/// Phase of the current search attempt.
///
/// The payload and the error message live inside their variants, so a
/// pending search never shows either and a result never coexists with an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded(Value),
    Failed(String),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    /// Short label for logs and the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Pending => "pending",
            RequestState::Succeeded(_) => "succeeded",
            RequestState::Failed(_) => "failed",
        }
    }
}

/// Everything a rendering layer needs to draw the search screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    /// Text in the query box
    pub query: String,
    /// Outcome of the last search attempt
    pub request: RequestState,
}

impl SearchState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            request: RequestState::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_pending()
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.request {
            RequestState::Succeeded(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.request {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_state_is_idle() {
        let state = SearchState::new("Samsung Galaxy M14");
        assert_eq!(state.query, "Samsung Galaxy M14");
        assert_eq!(state.request, RequestState::Idle);
        assert!(!state.is_loading());
        assert!(state.result().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_accessors_follow_variant() {
        let mut state = SearchState::new("q");

        state.request = RequestState::Succeeded(json!({"amazon": []}));
        assert_eq!(state.result(), Some(&json!({"amazon": []})));
        assert!(state.error().is_none());

        state.request = RequestState::Failed("Error: boom".to_string());
        assert_eq!(state.error(), Some("Error: boom"));
        assert!(state.result().is_none());

        state.request = RequestState::Pending;
        assert!(state.is_loading());
        assert!(state.result().is_none() && state.error().is_none());
    }
}
