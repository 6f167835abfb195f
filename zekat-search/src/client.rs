//! Webhook client: remote search with demo fallback, health probe, and the
//! direct alternate-index probe.
//!
//! [`WebhookClient::search`] never fails. Transport errors, non-success
//! statuses, undecodable bodies and bodies without usable records are all
//! logged and answered from [`crate::mock::filter`].

use std::time::Duration;

use reqwest::header::ACCEPT;
use serde_json::{json, Value};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::mock;
use crate::normalize::{normalize_direct_body, normalize_webhook_body};
use crate::source::ResearchSource;
use crate::types::{ResearchRecord, SearchOutcome};

/// Query sent by the health probe.
const HEALTH_PROBE_QUERY: &str = "test";

/// HTTP client bound to one [`SearchConfig`].
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    config: SearchConfig,
}

impl WebhookClient {
    /// Validate `config` and build a client for it.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an invalid configuration, or
    /// [`SearchError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let http = http::build_client(&config)?;
        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search the webhook, falling back to the demo corpus on any failure.
    ///
    /// The caller is expected to have checked the minimum query length.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        tracing::trace!(query, "webhook search");

        match self.fetch_webhook(query).await {
            Ok(records) if !records.is_empty() => {
                tracing::debug!(count = records.len(), "webhook returned records");
                SearchOutcome::remote(records)
            }
            Ok(_) => {
                tracing::warn!("webhook returned no usable records, using demo corpus");
                SearchOutcome::fallback(mock::filter(query))
            }
            Err(err) => {
                tracing::warn!(error = %err, "webhook search failed, using demo corpus");
                SearchOutcome::fallback(mock::filter(query))
            }
        }
    }

    /// Issue the webhook request and normalise its body.
    async fn fetch_webhook(&self, query: &str) -> Result<Vec<ResearchRecord>, SearchError> {
        let response = self
            .http
            .post(&self.config.webhook_url)
            .query(&[("q", query)])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("webhook request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = read_json(response, "webhook").await?;
        Ok(normalize_webhook_body(&body))
    }

    /// Probe the webhook with a fixed test query.
    ///
    /// Returns `true` only for a 2xx answer within the configured health
    /// timeout. Never errors.
    pub async fn check_health(&self) -> bool {
        let result = self
            .http
            .post(&self.config.webhook_url)
            .json(&json!({ "query": { "q": HEALTH_PROBE_QUERY } }))
            .timeout(Duration::from_secs(self.config.health_timeout_seconds))
            .send()
            .await;

        match result {
            Ok(response) => {
                let ok = response.status().is_success();
                tracing::debug!(status = response.status().as_u16(), ok, "health probe answered");
                ok
            }
            Err(err) => {
                tracing::debug!(error = %err, "health probe failed");
                false
            }
        }
    }

    /// Query the alternate index directly, without fallback.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Status`] for a non-success answer,
    /// [`SearchError::Http`] / [`SearchError::Timeout`] for transport
    /// failures, and [`SearchError::Parse`] for an undecodable body.
    pub async fn fetch_direct(&self, query: &str) -> Result<Vec<ResearchRecord>, SearchError> {
        tracing::trace!(query, "alternate index search");

        let limit = self.config.direct_limit.to_string();
        let response = self
            .http
            .get(&self.config.alternate_url)
            .query(&[
                ("q", query),
                ("order", "relevance-DESC"),
                ("page", "1"),
                ("limit", limit.as_str()),
            ])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("alternate index request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "alternate index rejected request");
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = read_json(response, "alternate index").await?;
        let records = normalize_direct_body(&body);
        tracing::debug!(count = records.len(), "alternate index returned records");
        Ok(records)
    }
}

impl ResearchSource for WebhookClient {
    async fn search(&self, query: &str) -> SearchOutcome {
        WebhookClient::search(self, query).await
    }

    async fn check_health(&self) -> bool {
        WebhookClient::check_health(self).await
    }
}

async fn read_json(response: reqwest::Response, endpoint: &str) -> Result<Value, SearchError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| SearchError::from_reqwest(&format!("{endpoint} response read failed"), e))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| SearchError::Parse(format!("{endpoint} returned invalid JSON: {e}")))
}
