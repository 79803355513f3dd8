//! Catalog loader: eager first page, background continuation, explicit
//! terminal states for both failure modes.
//!
//! Phases: `Idle -> LoadingFirst -> (Ready | BackgroundLoading) -> Ready`.
//! A first-page failure lands in `Failed` and stays there until a retry
//! resets the loader. A mid-stream background failure lands in `Partial`:
//! the pages already appended stand as the final catalog.

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use rotomdex_core::Entry;

use crate::error::EngineError;
use crate::source::CatalogSource;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogPhase {
    #[default]
    Idle,
    LoadingFirst,
    BackgroundLoading,
    Ready,
    /// Background continuation stopped early; the list so far is final.
    Partial {
        last_error: String,
    },
    /// First page never arrived; terminal until an explicit retry.
    Failed {
        reason: String,
    },
}

#[derive(Debug, Default)]
struct CatalogState {
    entries: Vec<Entry>,
    phase: CatalogPhase,
}

/// Owns the canonical append-only entry list and its loading phase.
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    state: Mutex<CatalogState>,
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            state: Mutex::new(CatalogState::default()),
        }
    }

    pub fn phase(&self) -> CatalogPhase {
        self.state.lock().unwrap().phase.clone()
    }

    /// Snapshot of the canonical list, catalog order.
    pub fn entries(&self) -> Vec<Entry> {
        self.state.lock().unwrap().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch the eager first page. Returns the continuation URL, if any;
    /// `notify` fires on every phase or list change.
    pub async fn load_first(&self, notify: &(dyn Fn() + Sync)) -> Result<Option<String>, EngineError> {
        self.state.lock().unwrap().phase = CatalogPhase::LoadingFirst;
        notify();

        match self.source.first_page().await {
            Ok(page) => {
                let next = page.next.clone();
                {
                    let mut state = self.state.lock().unwrap();
                    state.entries.extend(page.entries);
                    state.phase = if next.is_some() {
                        CatalogPhase::BackgroundLoading
                    } else {
                        CatalogPhase::Ready
                    };
                    info!(count = state.entries.len(), "first page loaded");
                }
                notify();
                Ok(next)
            }
            Err(err) => {
                self.state.lock().unwrap().phase = CatalogPhase::Failed {
                    reason: err.to_string(),
                };
                notify();
                Err(err.into())
            }
        }
    }

    /// Follow continuation URLs until exhaustion or first error, appending
    /// each page in token order. Errors are absorbed into `Partial`.
    pub async fn continue_from(&self, next: String, notify: &(dyn Fn() + Sync)) {
        let mut url = next;
        loop {
            match self.source.page_at(&url).await {
                Ok(page) => {
                    let upcoming = page.next.clone();
                    {
                        let mut state = self.state.lock().unwrap();
                        state.entries.extend(page.entries);
                        if upcoming.is_none() {
                            state.phase = CatalogPhase::Ready;
                            info!(total = state.entries.len(), "catalog complete");
                        }
                    }
                    notify();
                    match upcoming {
                        Some(upcoming) => url = upcoming,
                        None => break,
                    }
                }
                Err(err) => {
                    warn!(error = %err, "background page failed, keeping partial catalog");
                    self.state.lock().unwrap().phase = CatalogPhase::Partial {
                        last_error: err.to_string(),
                    };
                    notify();
                    break;
                }
            }
        }
    }

    /// Drop the list and return to `Idle`. The retry path calls this before
    /// re-entering `load_first`.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap();
        state.entries.clear();
        state.phase = CatalogPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use rotomdex_api::{ApiError, CatalogPage};

    fn entry(id: u32) -> Entry {
        Entry {
            id,
            name: format!("entry-{id}"),
            url: format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
        }
    }

    fn page(ids: &[u32], next: Option<&str>) -> CatalogPage {
        CatalogPage {
            entries: ids.iter().copied().map(entry).collect(),
            next: next.map(String::from),
        }
    }

    /// Serves a scripted sequence of pages; `Err(status)` produces an HTTP
    /// error. Counts every fetch.
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<CatalogPage, u16>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<CatalogPage, u16>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn next_page(&self) -> Result<CatalogPage, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.script.lock().unwrap().pop_front() {
                Some(Ok(page)) => Ok(page),
                Some(Err(status)) => Err(ApiError::Http { status }),
                None => panic!("scripted source exhausted"),
            }
        }
    }

    #[async_trait]
    impl CatalogSource for ScriptedSource {
        async fn first_page(&self) -> Result<CatalogPage, ApiError> {
            self.next_page()
        }

        async fn page_at(&self, _url: &str) -> Result<CatalogPage, ApiError> {
            self.next_page()
        }
    }

    #[tokio::test]
    async fn pages_append_in_fetch_order() {
        let source = ScriptedSource::new(vec![
            Ok(page(&[1, 2, 3], Some("page-2"))),
            Ok(page(&[4, 5], None)),
        ]);
        let loader = CatalogLoader::new(source.clone());

        let next = loader.load_first(&|| {}).await.unwrap();
        assert_eq!(next.as_deref(), Some("page-2"));
        assert_eq!(loader.phase(), CatalogPhase::BackgroundLoading);

        loader.continue_from(next.unwrap(), &|| {}).await;
        let ids: Vec<u32> = loader.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(loader.phase(), CatalogPhase::Ready);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn single_page_catalog_is_ready_immediately() {
        let source = ScriptedSource::new(vec![Ok(page(&[1, 2], None))]);
        let loader = CatalogLoader::new(source);

        let next = loader.load_first(&|| {}).await.unwrap();
        assert!(next.is_none());
        assert_eq!(loader.phase(), CatalogPhase::Ready);
        assert_eq!(loader.len(), 2);
    }

    #[tokio::test]
    async fn first_page_failure_is_terminal_failed() {
        let source = ScriptedSource::new(vec![Err(500)]);
        let loader = CatalogLoader::new(source);

        let err = loader.load_first(&|| {}).await.unwrap_err();
        assert!(matches!(err, EngineError::Api(ApiError::Http { status: 500 })));
        assert!(matches!(loader.phase(), CatalogPhase::Failed { .. }));
        assert!(loader.is_empty());
    }

    #[tokio::test]
    async fn background_failure_keeps_partial_catalog() {
        let source = ScriptedSource::new(vec![
            Ok(page(&[1, 2, 3], Some("page-2"))),
            Ok(page(&[4], Some("page-3"))),
            Err(503),
        ]);
        let loader = CatalogLoader::new(source);

        let next = loader.load_first(&|| {}).await.unwrap().unwrap();
        loader.continue_from(next, &|| {}).await;

        let ids: Vec<u32> = loader.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        match loader.phase() {
            CatalogPhase::Partial { last_error } => {
                assert!(last_error.contains("503"), "got {last_error:?}")
            }
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn notify_fires_after_every_page() {
        let source = ScriptedSource::new(vec![
            Ok(page(&[1], Some("page-2"))),
            Ok(page(&[2], Some("page-3"))),
            Ok(page(&[3], None)),
        ]);
        let loader = CatalogLoader::new(source);
        let ticks = AtomicUsize::new(0);
        let notify = || {
            ticks.fetch_add(1, Ordering::SeqCst);
        };

        let next = loader.load_first(&notify).await.unwrap().unwrap();
        // LoadingFirst transition + first page append.
        assert_eq!(ticks.load(Ordering::SeqCst), 2);

        loader.continue_from(next, &notify).await;
        // One more per background page.
        assert_eq!(ticks.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn reset_clears_list_and_phase() {
        let source = ScriptedSource::new(vec![Ok(page(&[1, 2], None))]);
        let loader = CatalogLoader::new(source);
        loader.load_first(&|| {}).await.unwrap();
        assert_eq!(loader.len(), 2);

        loader.reset();
        assert!(loader.is_empty());
        assert_eq!(loader.phase(), CatalogPhase::Idle);
    }
}
