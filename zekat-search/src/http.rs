//! Shared HTTP client for the webhook and the alternate index.
//!
//! No client-wide timeout is set: the main search request is allowed to
//! take as long as the webhook needs. The health probe applies its own
//! per-request deadline.

use crate::config::{SearchConfig, DEFAULT_USER_AGENT};
use crate::error::SearchError;

/// Build a [`reqwest::Client`] for research requests.
///
/// The client has:
/// - The configured User-Agent (or [`DEFAULT_USER_AGENT`])
/// - gzip decompression
/// - A bounded redirect policy
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = user_agent(config);

    reqwest::Client::builder()
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// The User-Agent string that requests built from `config` will carry.
pub fn user_agent(config: &SearchConfig) -> &str {
    config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
}
