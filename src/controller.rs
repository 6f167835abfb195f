//! Search view state machine.
//!
//! ```text
//!            qualifying query / retry
//!   ┌──────┐ ───────────────────────► ┌─────────┐  completion   ┌──────────────┐
//!   │ Idle │                          │ Loading ├─────────────► │ Success/Error│
//!   └──▲───┘ ◄── clear / empty query ─┴─────────┘ ◄──────────── └──────────────┘
//!      └──────────────────────────────────────────── new query / retry ──┘
//! ```
//!
//! Each search runs on its own task and reports back through a channel.
//! Every issued search gets a new generation number; a completion is only
//! applied when it belongs to the latest generation, so a slow response
//! to an older query can never overwrite newer results.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::{debug, trace, warn};
use zekat_search::{ResearchRecord, ResearchSource, ResultSource, SearchOutcome};

use crate::history::SearchHistory;
use crate::status::HealthHandle;

/// What the results area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing searched yet, or the search was cleared.
    Idle,
    /// A search is in flight.
    Loading,
    /// The latest search finished.
    Success {
        results: Vec<ResearchRecord>,
        source: ResultSource,
    },
    /// The latest search failed in a way the fallback could not absorb.
    Error { message: String },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Results on screen, if any.
    pub fn results(&self) -> &[ResearchRecord] {
        match self {
            Self::Success { results, .. } => results,
            _ => &[],
        }
    }
}

/// Result of a finished search task.
#[derive(Debug)]
pub struct Completion {
    generation: u64,
    query: String,
    result: Result<SearchOutcome, String>,
}

impl Completion {
    /// The query this completion answers.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Drives searches against a [`ResearchSource`] and owns the view state.
pub struct ViewController<S> {
    source: Arc<S>,
    history: SearchHistory,
    min_query_chars: usize,
    input: String,
    last_debounced: Option<String>,
    active_query: Option<String>,
    state: ViewState,
    generation: u64,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    health: Option<HealthHandle>,
}

impl<S> ViewController<S>
where
    S: ResearchSource + 'static,
{
    pub fn new(source: Arc<S>, history: SearchHistory, min_query_chars: usize) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            source,
            history,
            min_query_chars,
            input: String::new(),
            last_debounced: None,
            active_query: None,
            state: ViewState::Idle,
            generation: 0,
            completions_tx,
            completions_rx,
            health: None,
        }
    }

    /// Re-probe the webhook through `handle` whenever the debounced query changes.
    pub fn with_health(mut self, handle: HealthHandle) -> Self {
        self.health = Some(handle);
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Current input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut SearchHistory {
        &mut self.history
    }

    /// Replace the input text without searching.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn min_query_chars(&self) -> usize {
        self.min_query_chars
    }

    /// Whether `query` is long enough to be searched.
    pub fn qualifies(&self, query: &str) -> bool {
        query.trim().chars().count() >= self.min_query_chars
    }

    /// Handle a value emitted by the debouncer.
    ///
    /// Values that no longer match the input are stale and ignored, as is a
    /// repeat of the query already on screen. A blank query returns the view
    /// to [`ViewState::Idle`]; a query that is too short leaves the state
    /// untouched. Returns `true` if a search was issued.
    pub fn on_debounced_query(&mut self, query: &str) -> bool {
        if query != self.input {
            trace!(query, "debounced value superseded by newer input");
            return false;
        }

        if self.last_debounced.as_deref() != Some(query) {
            self.last_debounced = Some(query.to_owned());
            if let Some(health) = &self.health {
                health.refresh();
            }
        }

        if query.trim().is_empty() {
            if self.state != ViewState::Idle {
                self.reset();
            }
            return false;
        }
        if !self.qualifies(query) {
            trace!(query, "query below minimum length, not searching");
            return false;
        }
        let query = query.trim();
        if self.state != ViewState::Idle && self.active_query.as_deref() == Some(query) {
            trace!(query, "debounced query unchanged, not searching again");
            return false;
        }
        self.begin_search(query);
        true
    }

    /// Explicitly submit `query`, as pressing Enter or picking a history entry.
    ///
    /// A qualifying query is searched immediately and recorded in history.
    /// History persistence failures are logged and do not block the search.
    /// Returns `true` if a search was issued.
    pub fn submit(&mut self, query: &str) -> bool {
        self.input = query.to_owned();
        if !self.qualifies(query) {
            return false;
        }
        let query = query.trim();
        self.begin_search(query);
        if let Err(err) = self.history.add(query) {
            warn!(error = %err, "cannot record search history");
        }
        true
    }

    /// Submit the history entry at `index` (0 = newest).
    pub fn submit_history(&mut self, index: usize) -> bool {
        match self.history.get(index).map(str::to_owned) {
            Some(query) => self.submit(&query),
            None => false,
        }
    }

    /// Re-issue the current input. A no-op when the input is blank or too short.
    pub fn retry(&mut self) -> bool {
        if !self.qualifies(&self.input) {
            return false;
        }
        let query = self.input.trim().to_owned();
        self.begin_search(&query);
        true
    }

    /// Clear the input and results. In-flight searches are ignored when they finish.
    pub fn clear(&mut self) {
        self.input.clear();
        self.reset();
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.active_query = None;
        self.state = ViewState::Idle;
    }

    fn begin_search(&mut self, query: &str) {
        self.generation += 1;
        self.active_query = Some(query.to_owned());
        self.state = ViewState::Loading;
        let generation = self.generation;
        trace!(query, generation, "issuing search");

        let source = Arc::clone(&self.source);
        let tx = self.completions_tx.clone();
        let query = query.to_owned();

        tokio::spawn(async move {
            let task_query = query.clone();
            let search = tokio::spawn(async move { source.search(&task_query).await });
            let result = search.await.map_err(describe_join_error);
            let _ = tx.send(Completion {
                generation,
                query,
                result,
            });
        });
    }

    /// Wait for the next finished search, stale or not.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completions_rx.recv().await
    }

    /// Apply a completion. Returns `false` if it was stale and discarded.
    pub fn apply(&mut self, completion: Completion) -> bool {
        if completion.generation != self.generation {
            debug!(
                generation = completion.generation,
                current = self.generation,
                "discarding stale search result"
            );
            return false;
        }
        self.state = match completion.result {
            Ok(outcome) => {
                debug!(
                    count = outcome.records.len(),
                    source = %outcome.source,
                    "search finished"
                );
                ViewState::Success {
                    results: outcome.records,
                    source: outcome.source,
                }
            }
            Err(message) => {
                warn!(error = %message, "search failed");
                ViewState::Error { message }
            }
        };
        true
    }

    /// Wait for completions until the latest search has been applied.
    ///
    /// Returns immediately when nothing is loading.
    pub async fn settle(&mut self) {
        while self.state.is_loading() {
            match self.next_completion().await {
                Some(completion) => {
                    self.apply(completion);
                }
                None => break,
            }
        }
    }
}

fn describe_join_error(err: JoinError) -> String {
    if err.is_panic() {
        let payload = err.into_panic();
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_owned());
        format!("search task panicked: {detail}")
    } else {
        "search task was cancelled".to_owned()
    }
}
