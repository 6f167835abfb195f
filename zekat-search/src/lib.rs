//! # zekat-search
//!
//! Academic publication search for zakat and Islamic finance topics.
//!
//! Searches go to a webhook that proxies a third-party academic index. The
//! webhook is unreliable by nature, so every failure mode degrades to a
//! small built-in demo corpus instead of an error.
//!
//! ## Design
//!
//! - One `POST <webhook>?q=<query>` per search, no timeout, no retries
//! - Several accepted response shapes, matched in priority order
//! - Per-field fallback keys when normalising items into [`ResearchRecord`]
//! - Demo corpus fallback on transport errors, error statuses, undecodable
//!   or empty bodies
//! - A 5-second health probe and an optional direct query against the
//!   alternate index
//!
//! ## Privacy
//!
//! Query text is logged at trace level only.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod normalize;
pub mod source;
pub mod types;

pub use client::WebhookClient;
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use source::ResearchSource;
pub use types::{ResearchRecord, ResultSource, SearchOutcome};

/// Search the webhook using `config`, falling back to the demo corpus.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid. Remote failures
/// never produce an error.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> zekat_search::Result<()> {
/// let config = zekat_search::SearchConfig::default();
/// let outcome = zekat_search::search("zekât hesaplama", &config).await?;
/// for record in &outcome.records {
///     println!("{} ({})", record.title, outcome.source);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &SearchConfig) -> Result<SearchOutcome> {
    let client = WebhookClient::new(config.clone())?;
    Ok(client.search(query).await)
}

/// Search with the default production endpoints.
///
/// # Errors
///
/// Same as [`search`].
pub async fn search_default(query: &str) -> Result<SearchOutcome> {
    search(query, &SearchConfig::default()).await
}

/// Probe the webhook. Returns `false` for an invalid configuration.
pub async fn check_health(config: &SearchConfig) -> bool {
    match WebhookClient::new(config.clone()) {
        Ok(client) => client.check_health().await,
        Err(err) => {
            tracing::warn!(error = %err, "cannot build client for health probe");
            false
        }
    }
}

/// Query the alternate index directly, without any fallback.
///
/// # Errors
///
/// Returns [`SearchError`] for an invalid configuration, transport failure,
/// non-success status, or undecodable body.
pub async fn fetch_direct(query: &str, config: &SearchConfig) -> Result<Vec<ResearchRecord>> {
    WebhookClient::new(config.clone())?.fetch_direct(query).await
}
