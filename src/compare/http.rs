use crate::compare::{CompareRequest, CompareService};
use crate::error::SearchError;
use reqwest::Client;

/// Comparison service reached over HTTP.
///
/// No timeout is configured: a search waits as long as the service takes.
#[derive(Clone)]
pub struct HttpCompareClient {
    client: Client,
    base_url: String,
}

impl HttpCompareClient {
    /// Create a client for the service rooted at `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the service's `/health` payload.
    pub async fn health(&self) -> Result<serde_json::Value, SearchError> {
        let url = self.endpoint("/health");
        tracing::debug!(url = %url, "health check request");

        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    /// Fetch the per-site availability report from `/status`.
    pub async fn site_status(&self) -> Result<serde_json::Value, SearchError> {
        let url = self.endpoint("/status");
        tracing::debug!(url = %url, "site status request");

        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, SearchError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "comparison service returned error status");
            return Err(SearchError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        Ok(body)
    }
}

#[async_trait::async_trait]
impl CompareService for HttpCompareClient {
    async fn compare(&self, request: &CompareRequest) -> Result<serde_json::Value, SearchError> {
        let url = self.endpoint("/compare");

        tracing::debug!(
            url = %url,
            query = %request.query,
            sites = ?request.sites,
            max_results_per_site = request.max_results_per_site,
            "compare request"
        );

        // `.json()` also sets `Content-Type: application/json`.
        let response = self.client.post(&url).json(request).send().await.map_err(|e| {
            tracing::warn!(error = %e, "compare request failed to send");
            SearchError::from(e)
        })?;

        let body = Self::read_json(response).await?;
        tracing::debug!(query = %request.query, "compare response received");
        Ok(body)
    }
}
