//! Environment-driven configuration for the Joplin client.

use notelink_core::{Error, Result};

/// Default Joplin Data API endpoint (the Web Clipper service port).
pub const DEFAULT_JOPLIN_URL: &str = "http://127.0.0.1:41184";

/// Default page size for listing calls.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Connection settings for the Joplin Data API.
#[derive(Debug, Clone)]
pub struct JoplinConfig {
    /// Base URL of the API, no trailing slash required.
    pub base_url: String,
    /// The authorization token Joplin shows in the Web Clipper
    /// options.
    pub token: String,
    /// Items per page when draining listing endpoints.
    pub page_limit: u32,
}

impl JoplinConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Read configuration from the environment.
    ///
    /// `NOTELINK_JOPLIN_TOKEN` is required; `NOTELINK_JOPLIN_URL` and
    /// `NOTELINK_PAGE_LIMIT` fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("NOTELINK_JOPLIN_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Config("NOTELINK_JOPLIN_TOKEN is not set".to_string()))?;

        let base_url = std::env::var("NOTELINK_JOPLIN_URL")
            .unwrap_or_else(|_| DEFAULT_JOPLIN_URL.to_string());

        let page_limit = std::env::var("NOTELINK_PAGE_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_PAGE_LIMIT);

        Ok(Self {
            base_url,
            token,
            page_limit,
        })
    }
}
