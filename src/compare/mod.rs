pub mod http;

pub use http::HttpCompareClient;

use crate::error::SearchError;
use serde::Serialize;

/// Per-site result cap sent with every comparison.
pub const MAX_RESULTS_PER_SITE: u32 = 10;

/// Sites every comparison covers.
pub const SITES: [&str; 3] = ["flipkart", "amazon", "reliance"];

/// Comparison service abstraction - the HTTP client is one implementation,
/// tests plug in scripted ones.
#[async_trait::async_trait]
pub trait CompareService: Send + Sync {
    /// Compare a query across sites, returning the service's JSON body untouched.
    async fn compare(&self, request: &CompareRequest) -> Result<serde_json::Value, SearchError>;
}

/// Body of `POST /compare`.
///
/// Field order is part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareRequest {
    pub query: String,
    pub max_results_per_site: u32,
    pub sites: Vec<String>,
}

impl CompareRequest {
    /// Build a request for `query` using the fixed site list and result cap.
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results_per_site: MAX_RESULTS_PER_SITE,
            sites: SITES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
