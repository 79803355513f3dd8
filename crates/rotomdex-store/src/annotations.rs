//! Per-generation "seen" and "caught" id sets with durable JSON persistence.
//!
//! Partitions are namespaced by the generation range table, so an id lives
//! in at most one partition. Every mutation that changes state rewrites the
//! whole file; a write failure is logged and swallowed so the session keeps
//! its in-memory state. Load never fails: missing file, unreadable JSON, or
//! individually malformed partitions all degrade to less persisted state.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use rotomdex_core::{GENERATIONS, generation_of};

use crate::StoreError;

/// One generation's annotation sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    #[serde(default)]
    pub seen: BTreeSet<u32>,
    #[serde(default)]
    pub caught: BTreeSet<u32>,
}

/// The persisted annotation store.
pub struct AnnotationStore {
    path: PathBuf,
    partitions: BTreeMap<&'static str, Partition>,
}

impl AnnotationStore {
    /// Open the store at `path`, rehydrating whatever state survives.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let partitions = load_partitions(&path);
        debug!(path = %path.display(), partitions = partitions.len(), "annotation store opened");
        Self { path, partitions }
    }

    /// Platform default location for the annotation file.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rotomdex")
            .join("annotations.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mark or unmark an id as seen. Ids outside every generation range are
    /// silently ignored.
    pub fn set_seen(&mut self, id: u32, seen: bool) {
        let Some(key) = partition_key(id) else { return };
        let changed = if seen {
            self.partitions.entry(key).or_default().seen.insert(id)
        } else {
            self.partitions
                .get_mut(key)
                .is_some_and(|p| p.seen.remove(&id))
        };
        if changed {
            self.persist();
        }
    }

    /// Mark or unmark an id as caught. Catching implies seeing; releasing
    /// does not un-see.
    pub fn set_caught(&mut self, id: u32, caught: bool) {
        let Some(key) = partition_key(id) else { return };
        let changed = if caught {
            let part = self.partitions.entry(key).or_default();
            let newly_caught = part.caught.insert(id);
            let newly_seen = part.seen.insert(id);
            newly_caught || newly_seen
        } else {
            self.partitions
                .get_mut(key)
                .is_some_and(|p| p.caught.remove(&id))
        };
        if changed {
            self.persist();
        }
    }

    pub fn is_seen(&self, id: u32) -> bool {
        partition_key(id)
            .and_then(|key| self.partitions.get(key))
            .is_some_and(|p| p.seen.contains(&id))
    }

    pub fn is_caught(&self, id: u32) -> bool {
        partition_key(id)
            .and_then(|key| self.partitions.get(key))
            .is_some_and(|p| p.caught.contains(&id))
    }

    /// Snapshot of every caught id across all partitions.
    pub fn caught_ids(&self) -> BTreeSet<u32> {
        self.partitions
            .values()
            .flat_map(|p| p.caught.iter().copied())
            .collect()
    }

    /// Per-generation `(name, seen, caught)` counts, table order.
    pub fn tallies(&self) -> Vec<(&'static str, usize, usize)> {
        GENERATIONS
            .iter()
            .map(|g| {
                let (seen, caught) = self
                    .partitions
                    .get(g.name)
                    .map(|p| (p.seen.len(), p.caught.len()))
                    .unwrap_or((0, 0));
                (g.name, seen, caught)
            })
            .collect()
    }

    fn persist(&self) {
        if let Err(err) = self.write_all() {
            warn!(
                path = %self.path.display(),
                error = %err,
                "failed to persist annotations; keeping in-memory state"
            );
        }
    }

    fn write_all(&self) -> Result<(), StoreError> {
        let mut root = serde_json::Map::new();
        for (name, part) in &self.partitions {
            root.insert((*name).to_string(), serde_json::to_value(part)?);
        }
        root.insert("saved_at".into(), Value::String(Utc::now().to_rfc3339()));
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(root))?)?;
        Ok(())
    }
}

fn partition_key(id: u32) -> Option<&'static str> {
    generation_of(id).map(|g| g.name)
}

fn load_partitions(path: &Path) -> BTreeMap<&'static str, Partition> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %err, "annotation file unreadable, starting empty");
            }
            return BTreeMap::new();
        }
    };
    parse_partitions(&raw)
}

fn parse_partitions(raw: &str) -> BTreeMap<&'static str, Partition> {
    let mut out = BTreeMap::new();
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "annotation file is not valid JSON, starting empty");
            return out;
        }
    };
    let Some(map) = value.as_object() else {
        warn!("annotation file is not a JSON object, starting empty");
        return out;
    };
    // Only generation names are partition keys; anything else (including the
    // saved_at stamp) is ignored.
    for generation in GENERATIONS {
        let Some(val) = map.get(generation.name) else {
            continue;
        };
        match serde_json::from_value::<Partition>(val.clone()) {
            Ok(partition) => {
                out.insert(generation.name, partition);
            }
            Err(err) => {
                warn!(partition = generation.name, error = %err, "skipping malformed partition");
            }
        }
    }
    out
}
