use crate::search::DEFAULT_QUERY;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root URL of the comparison service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Query the search box starts with
    #[serde(default = "default_query")]
    pub default_query: String,

    /// Write debug logs to a file
    #[serde(default)]
    pub debug: bool,

    /// Log file or directory (defaults next to the config file)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_rotation: Option<DebugLogRotation>,

    /// How many rotated log files to keep (0 = keep all)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_keep: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_query: default_query(),
            debug: false,
            debug_log_path: None,
            debug_log_rotation: None,
            debug_log_keep: None,
        }
    }
}

impl Config {
    /// Apply a base URL given on the command line or through the environment.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }
}

/// How debug log files are rotated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebugLogRotation {
    /// One file, appended across runs
    None,
    /// One file per day
    Daily,
    /// One file per run
    Session,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}
