//! Fetch-and-memoize detail cache with in-flight deduplication.
//!
//! Each key owns a `OnceCell` slot: concurrent lookups for the same key
//! collapse onto one upstream fetch, and a failed fetch leaves the slot
//! empty so the next lookup retries (failures are never negatively cached).

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;
use tracing::warn;

use rotomdex_core::{EntityRecord, MoveRecord};

use crate::error::EngineError;
use crate::source::DetailSource;

type Slot<T> = Arc<OnceCell<Arc<T>>>;

/// Session-lifetime memo of entity, move, encounter, and evolution lookups.
pub struct DetailCache {
    source: Arc<dyn DetailSource>,
    entities: Mutex<HashMap<u32, Slot<EntityRecord>>>,
    moves: Mutex<HashMap<String, Slot<MoveRecord>>>,
    encounters: Mutex<HashMap<u32, Slot<Vec<String>>>>,
    evolutions: Mutex<HashMap<String, Slot<Vec<String>>>>,
}

impl DetailCache {
    pub fn new(source: Arc<dyn DetailSource>) -> Self {
        Self {
            source,
            entities: Mutex::new(HashMap::new()),
            moves: Mutex::new(HashMap::new()),
            encounters: Mutex::new(HashMap::new()),
            evolutions: Mutex::new(HashMap::new()),
        }
    }

    /// Full detail record for `id`. Errors are recoverable and leave the
    /// cache unpopulated.
    pub async fn entity(&self, id: u32) -> Result<Arc<EntityRecord>, EngineError> {
        let slot = slot_for(&self.entities, id);
        let record = slot
            .get_or_try_init(|| async { self.source.entity(id).await.map(Arc::new) })
            .await?;
        Ok(Arc::clone(record))
    }

    /// Move record for `url`. A failed lookup returns the empty sentinel
    /// and caches nothing.
    pub async fn move_record(&self, url: &str) -> Arc<MoveRecord> {
        let slot = slot_for(&self.moves, url.to_string());
        let attempt = slot
            .get_or_try_init(|| async { self.source.move_record(url).await.map(Arc::new) })
            .await;
        match attempt {
            Ok(record) => Arc::clone(record),
            Err(err) => {
                warn!(url = %url, error = %err, "move lookup failed, returning empty record");
                Arc::new(MoveRecord::default())
            }
        }
    }

    /// Encounter location names for `id`.
    pub async fn encounters(&self, id: u32) -> Result<Arc<Vec<String>>, EngineError> {
        let slot = slot_for(&self.encounters, id);
        let list = slot
            .get_or_try_init(|| async { self.source.encounters(id).await.map(Arc::new) })
            .await?;
        Ok(Arc::clone(list))
    }

    /// Flattened evolution chain resolved from a species URL.
    pub async fn evolution(&self, species_url: &str) -> Result<Arc<Vec<String>>, EngineError> {
        let slot = slot_for(&self.evolutions, species_url.to_string());
        let list = slot
            .get_or_try_init(|| async {
                self.source.evolution_names(species_url).await.map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(list))
    }
}

fn slot_for<K, T>(map: &Mutex<HashMap<K, Slot<T>>>, key: K) -> Slot<T>
where
    K: Eq + Hash,
{
    map.lock().unwrap().entry(key).or_default().clone()
}
