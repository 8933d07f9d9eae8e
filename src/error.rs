/// Why a search attempt did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Query was empty or whitespace; nothing was sent.
    #[error("Please enter a search query")]
    EmptyQuery,

    /// The service answered with a non-success status.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// No usable response: connection failure, broken body, undecodable JSON.
    #[error("{0}")]
    Transport(String),
}

impl SearchError {
    /// The message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::EmptyQuery => self.to_string(),
            _ => format!("Error: {}", self),
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's top-level message hides the cause ("error sending request for url").
        let mut description = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            description.push_str(": ");
            description.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        SearchError::Transport(description)
    }
}
