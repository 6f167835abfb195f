//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] names the endpoints that are queried and the limits
//! applied to them. The defaults point at the production webhook and the
//! public TRDizin index.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SearchError;

/// Default webhook that proxies the academic index.
pub const DEFAULT_WEBHOOK_URL: &str = "https://pandaow3r.app.n8n.cloud/webhook/webhook-deneme";

/// Default alternate index queried by the direct probe.
pub const DEFAULT_ALTERNATE_URL: &str =
    "https://search.trdizin.gov.tr/api/defaultSearch/publication/";

/// User-Agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; Research-App/1.0)";

/// Configuration for the research endpoints.
///
/// Use [`Default::default()`] for the production endpoints, or construct
/// with field overrides (tests point both URLs at a mock server).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Webhook receiving `POST ?q=<query>` searches and the health probe.
    pub webhook_url: String,
    /// Alternate index queried directly by [`crate::fetch_direct`].
    pub alternate_url: String,
    /// Timeout for the health probe in seconds. The main search request
    /// has no timeout.
    pub health_timeout_seconds: u64,
    /// `limit` parameter sent to the alternate index.
    pub direct_limit: usize,
    /// Custom User-Agent string. If `None`, [`DEFAULT_USER_AGENT`] is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_owned(),
            alternate_url: DEFAULT_ALTERNATE_URL.to_owned(),
            health_timeout_seconds: 5,
            direct_limit: 5,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `webhook_url` and `alternate_url` parse as absolute http(s) URLs
    /// - `health_timeout_seconds` must be greater than 0
    /// - `direct_limit` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        check_endpoint("webhook_url", &self.webhook_url)?;
        check_endpoint("alternate_url", &self.alternate_url)?;
        if self.health_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "health_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.direct_limit == 0 {
            return Err(SearchError::Config(
                "direct_limit must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

fn check_endpoint(field: &str, value: &str) -> Result<(), SearchError> {
    if value.trim().is_empty() {
        return Err(SearchError::Config(format!("{field} must not be empty")));
    }
    let parsed = Url::parse(value)
        .map_err(|e| SearchError::Config(format!("{field} is not a valid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(SearchError::Config(format!(
            "{field} must use http or https, got {other}"
        ))),
    }
}
