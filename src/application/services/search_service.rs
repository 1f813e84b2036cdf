//! Search-as-you-type with debouncing and cancellation of stale queries.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::task::AbortHandle;
use tracing::debug;

use crate::domain::entities::SearchResults;
use crate::domain::errors::ApiError;
use crate::domain::ports::CatalogPort;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search superseded by a newer query")]
    Superseded,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("search task failed: {0}")]
    Task(String),
}

/// Runs catalog searches so that only the latest query produces results.
///
/// Each call waits out the debounce window before hitting the backend. A new
/// call aborts whatever search is still pending.
pub struct SearchService {
    catalog: Arc<dyn CatalogPort>,
    debounce: Duration,
    generation: AtomicU64,
    /// Generation that spawned the pending task, and its abort handle.
    pending: Mutex<Option<(u64, AbortHandle)>>,
}

impl SearchService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogPort>, debounce: Duration) -> Self {
        Self {
            catalog,
            debounce,
            generation: AtomicU64::new(0),
            pending: Mutex::new(None),
        }
    }

    /// # Errors
    /// `Superseded` if a newer search started first, `Api` if the backend failed.
    pub async fn search(&self, query: &str) -> Result<SearchResults, SearchError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim().to_string();

        if query.is_empty() {
            self.cancel();
            return Ok(SearchResults::default());
        }

        let catalog = Arc::clone(&self.catalog);
        let debounce = self.debounce;
        let task_query = query.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            catalog.search(&task_query).await
        });

        if let Some((_, previous)) = self
            .pending
            .lock()
            .replace((generation, handle.abort_handle()))
        {
            previous.abort();
        }

        let outcome = handle.await;
        self.release(generation);

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(query = %query, "Discarding stale search result");
            return Err(SearchError::Superseded);
        }

        match outcome {
            Ok(result) => {
                let results = result?;
                debug!(query = %query, hits = results.total(), "Search completed");
                Ok(results)
            }
            Err(e) if e.is_cancelled() => Err(SearchError::Superseded),
            Err(e) => Err(SearchError::Task(e.to_string())),
        }
    }

    /// Aborts the pending search, if any.
    pub fn cancel(&self) {
        if let Some((_, previous)) = self.pending.lock().take() {
            debug!("Cancelling pending search");
            previous.abort();
        }
    }

    /// Clears the pending slot only if it still belongs to `generation`.
    fn release(&self, generation: u64) {
        let mut pending = self.pending.lock();
        if pending.as_ref().is_some_and(|(owner, _)| *owner == generation) {
            pending.take();
        }
    }
}

impl Drop for SearchService {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Artist, ArtistId};
    use crate::domain::ports::mocks::MockCatalogPort;

    fn results_with_artist() -> SearchResults {
        SearchResults {
            artists: vec![Artist {
                id: ArtistId::from("1"),
                name: "Rainfall".to_string(),
                bio: None,
                avatar_url: None,
                follower_count: 0,
            }],
            ..SearchResults::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_trims_query() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_search()
            .withf(|query| query == "rain")
            .times(1)
            .returning(|_| Ok(results_with_artist()));
        let service = SearchService::new(Arc::new(catalog), DEFAULT_DEBOUNCE);

        let results = service.search("  rain ").await.unwrap();

        assert_eq!(results.total(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_query_skips_backend() {
        let mut catalog = MockCatalogPort::new();
        catalog.expect_search().never();
        let service = SearchService::new(Arc::new(catalog), DEFAULT_DEBOUNCE);

        let results = service.search("   ").await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_query_supersedes_pending() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_search()
            .withf(|query| query == "rain")
            .times(1)
            .returning(|_| Ok(results_with_artist()));
        let service = Arc::new(SearchService::new(Arc::new(catalog), DEFAULT_DEBOUNCE));

        let first = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.search("ra").await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        let second = service.search("rain").await.unwrap();

        assert_eq!(second.total(), 1);
        assert!(matches!(first.await.unwrap(), Err(SearchError::Superseded)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_search_keeps_newer_pending_handle() {
        let service = SearchService::new(Arc::new(MockCatalogPort::new()), DEFAULT_DEBOUNCE);
        let newer = tokio::spawn(tokio::time::sleep(Duration::from_secs(60)));
        *service.pending.lock() = Some((2, newer.abort_handle()));

        service.release(1);
        assert!(service.pending.lock().is_some());

        service.cancel();
        assert!(newer.await.unwrap_err().is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_search_clears_own_handle() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_search()
            .returning(|_| Ok(results_with_artist()));
        let service = SearchService::new(Arc::new(catalog), Duration::ZERO);

        service.search("rain").await.unwrap();

        assert!(service.pending.lock().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_error_is_surfaced() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_search()
            .returning(|_| Err(ApiError::network("offline")));
        let service = SearchService::new(Arc::new(catalog), Duration::ZERO);

        let result = service.search("rain").await;

        assert!(matches!(
            result,
            Err(SearchError::Api(ApiError::NetworkError { .. }))
        ));
    }
}
