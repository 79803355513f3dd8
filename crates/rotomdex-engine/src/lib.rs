//! The owning controller for the catalog session.
//!
//! One [`Engine`] holds every piece of mutable state (canonical list,
//! detail cache, annotation store, filter/search/sort) and broadcasts a
//! revision bump over a watch channel whenever any of it changes. Consumers
//! recompute their view from a snapshot; nothing reaches into the state
//! directly.

mod cache;
mod debounce;
mod error;
mod loader;
mod source;

pub use cache::DetailCache;
pub use debounce::{DEBOUNCE_QUIET, Debouncer};
pub use error::EngineError;
pub use loader::{CatalogLoader, CatalogPhase};
pub use source::{CatalogSource, DetailSource};

use std::sync::{Arc, Mutex};

use futures::StreamExt;
use tokio::sync::watch;
use tracing::debug;

use rotomdex_api::ApiClient;
use rotomdex_core::{
    EntityRecord, FilterState, MoveRecord, SearchMode, SearchState, SortState, View, derive_view,
};
use rotomdex_store::AnnotationStore;

/// Cap on simultaneous detail fetches during a prefetch sweep.
const PREFETCH_CONCURRENCY: usize = 8;

#[derive(Debug, Default, Clone)]
struct ViewInputs {
    filter: FilterState,
    search: SearchState,
    sort: SortState,
}

/// Context object owning all session state. Cheap to share behind an `Arc`;
/// every method takes `&self`.
pub struct Engine {
    loader: CatalogLoader,
    cache: DetailCache,
    annotations: Mutex<AnnotationStore>,
    view_state: Mutex<ViewInputs>,
    debounce: Mutex<Debouncer>,
    revision: Arc<watch::Sender<u64>>,
}

impl Engine {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        details: Arc<dyn DetailSource>,
        store: AnnotationStore,
    ) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            loader: CatalogLoader::new(catalog),
            cache: DetailCache::new(details),
            annotations: Mutex::new(store),
            view_state: Mutex::new(ViewInputs::default()),
            debounce: Mutex::new(Debouncer::default()),
            revision: Arc::new(revision),
        }
    }

    /// Wire a real API client into both source seams.
    pub fn with_client(client: ApiClient, store: AnnotationStore) -> Self {
        let client = Arc::new(client);
        let catalog: Arc<dyn CatalogSource> = client.clone();
        let details: Arc<dyn DetailSource> = client;
        Self::new(catalog, details, store)
    }

    // ── Change notification ──

    /// Receiver that observes every state-change revision.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    // ── Catalog loading ──

    pub fn phase(&self) -> CatalogPhase {
        self.loader.phase()
    }

    pub fn catalog_len(&self) -> usize {
        self.loader.len()
    }

    /// Eagerly load the first page. Returns the continuation URL to hand to
    /// [`continue_background`](Self::continue_background), if any.
    pub async fn load_first(&self) -> Result<Option<String>, EngineError> {
        self.loader.load_first(&|| self.notify()).await
    }

    /// Follow the continuation until exhaustion or first error. Run this
    /// concurrently with view consumption; the view lags the canonical list
    /// by at most one pending page.
    pub async fn continue_background(&self, next: String) {
        self.loader.continue_from(next, &|| self.notify()).await;
    }

    /// First page plus full background drain in one call.
    pub async fn load_all(&self) -> Result<(), EngineError> {
        if let Some(next) = self.load_first().await? {
            self.continue_background(next).await;
        }
        Ok(())
    }

    /// Explicit retry after a failed first load: clears the canonical list
    /// and the search/filter state, then reruns the first page. Annotations
    /// and cached details survive (they are keyed by id and stay valid).
    pub async fn retry(&self) -> Result<Option<String>, EngineError> {
        self.loader.reset();
        {
            let mut view = self.view_state.lock().unwrap();
            view.search = SearchState::default();
            view.filter = FilterState::default();
        }
        self.debounce.lock().unwrap().cancel();
        self.notify();
        self.load_first().await
    }

    // ── View derivation ──

    /// Compute the current view from a snapshot of all inputs.
    pub fn view(&self) -> View {
        let entries = self.loader.entries();
        let inputs = self.view_state.lock().unwrap().clone();
        let caught = self.annotations.lock().unwrap().caught_ids();
        derive_view(&entries, &inputs.filter, &inputs.search, inputs.sort, |id| {
            caught.contains(&id)
        })
    }

    pub fn filter_state(&self) -> FilterState {
        self.view_state.lock().unwrap().filter.clone()
    }

    pub fn search_state(&self) -> SearchState {
        self.view_state.lock().unwrap().search.clone()
    }

    pub fn set_filter(&self, filter: FilterState) {
        self.view_state.lock().unwrap().filter = filter;
        self.notify();
    }

    pub fn set_sort(&self, sort: SortState) {
        self.view_state.lock().unwrap().sort = sort;
        self.notify();
    }

    pub fn set_search_mode(&self, mode: SearchMode) {
        self.view_state.lock().unwrap().search.mode = mode;
        self.notify();
    }

    /// Record a search keystroke. The query is visible in state at once,
    /// but the recomputation signal waits out the quiet period; rapid
    /// keystrokes coalesce into one bump carrying the last value.
    pub fn search_input(&self, query: impl Into<String>) {
        self.view_state.lock().unwrap().search.query = query.into();
        let revision = Arc::clone(&self.revision);
        self.debounce.lock().unwrap().trigger(move || {
            revision.send_modify(|rev| *rev += 1);
        });
    }

    /// Reset the query and recompute immediately, skipping the quiet period.
    pub fn clear_search(&self) {
        self.debounce.lock().unwrap().cancel();
        self.view_state.lock().unwrap().search.query.clear();
        self.notify();
    }

    // ── Annotations ──

    pub fn set_seen(&self, id: u32, seen: bool) {
        self.annotations.lock().unwrap().set_seen(id, seen);
        self.notify();
    }

    pub fn set_caught(&self, id: u32, caught: bool) {
        self.annotations.lock().unwrap().set_caught(id, caught);
        self.notify();
    }

    pub fn is_seen(&self, id: u32) -> bool {
        self.annotations.lock().unwrap().is_seen(id)
    }

    pub fn is_caught(&self, id: u32) -> bool {
        self.annotations.lock().unwrap().is_caught(id)
    }

    pub fn annotation_tallies(&self) -> Vec<(&'static str, usize, usize)> {
        self.annotations.lock().unwrap().tallies()
    }

    // ── Details ──

    pub async fn entity(&self, id: u32) -> Result<Arc<EntityRecord>, EngineError> {
        self.cache.entity(id).await
    }

    pub async fn move_record(&self, url: &str) -> Arc<MoveRecord> {
        self.cache.move_record(url).await
    }

    pub async fn encounters(&self, id: u32) -> Result<Arc<Vec<String>>, EngineError> {
        self.cache.encounters(id).await
    }

    /// Resolve the entity's evolution chain via its species link.
    pub async fn evolution_chain(&self, id: u32) -> Result<Arc<Vec<String>>, EngineError> {
        let entity = self.cache.entity(id).await?;
        if entity.species_url.is_empty() {
            return Err(EngineError::NoSpecies(id));
        }
        self.cache.evolution(&entity.species_url).await
    }

    /// Warm the entity cache for a batch of ids (e.g. the visible slice of
    /// a view). Individual failures are logged and skipped.
    pub async fn prefetch_entities(&self, ids: &[u32]) {
        let mut lookups = futures::stream::iter(ids.iter().map(|&id| self.cache.entity(id)))
            .buffer_unordered(PREFETCH_CONCURRENCY);
        while let Some(result) = lookups.next().await {
            if let Err(err) = result {
                debug!(error = %err, "prefetch lookup failed");
            }
        }
    }
}
