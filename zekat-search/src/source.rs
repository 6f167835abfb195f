//! Trait definition for pluggable research backends.
//!
//! [`crate::WebhookClient`] is the production implementation. Callers that
//! drive searches (view controllers, status monitors) are generic over
//! [`ResearchSource`] so they can run against an in-process fake.

use crate::types::SearchOutcome;

/// A backend that answers searches and reports its own reachability.
///
/// All implementations must be `Send + Sync` so searches can run on
/// spawned tasks.
pub trait ResearchSource: Send + Sync {
    /// Search for `query`.
    ///
    /// Implementations absorb their own failures: the returned outcome is
    /// always usable, typically by falling back to the demo corpus.
    fn search(&self, query: &str) -> impl std::future::Future<Output = SearchOutcome> + Send;

    /// Returns `true` if the backend is currently reachable.
    fn check_health(&self) -> impl std::future::Future<Output = bool> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use crate::types::ResearchRecord;

    /// A source that never touches the network.
    struct OfflineSource;

    impl ResearchSource for OfflineSource {
        async fn search(&self, query: &str) -> SearchOutcome {
            SearchOutcome::fallback(mock::filter(query))
        }

        async fn check_health(&self) -> bool {
            false
        }
    }

    /// A source answering every query with one fixed record.
    struct FixedSource(ResearchRecord);

    impl ResearchSource for FixedSource {
        async fn search(&self, _query: &str) -> SearchOutcome {
            SearchOutcome::remote(vec![self.0.clone()])
        }

        async fn check_health(&self) -> bool {
            true
        }
    }

    #[test]
    fn sources_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OfflineSource>();
        assert_send_sync::<FixedSource>();
    }

    #[tokio::test]
    async fn offline_source_answers_from_corpus() {
        let outcome = OfflineSource.search("xyz123").await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.records.len(), mock::FALLBACK_LEN);
        assert!(!OfflineSource.check_health().await);
    }

    #[tokio::test]
    async fn fixed_source_answers_remotely() {
        let source = FixedSource(ResearchRecord::new("Sabit"));
        let outcome = source.search("anything").await;
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.records[0].title, "Sabit");
        assert!(source.check_health().await);
    }
}
