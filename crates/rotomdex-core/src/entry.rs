//! Shared catalog types for the Rotomdex engine.

use serde::{Deserialize, Serialize};

/// Minimal catalog record: one row of the paginated index.
///
/// Identity is the numeric id. Entries are immutable once parsed and live in
/// the canonical list for the whole session, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: u32,
    pub name: String,
    pub url: String,
}

/// Full detail payload for one catalog entry.
///
/// Fetched lazily on first request, cached for the session, never
/// invalidated (catalog data is treated as immutable while running).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub moves: Vec<MoveRef>,
    pub sprites: SpriteSet,
    /// Height in decimetres, as the API reports it.
    pub height: u32,
    /// Weight in hectograms, as the API reports it.
    pub weight: u32,
    pub base_experience: Option<u32>,
    pub species_url: String,
    pub cry: Option<String>,
}

impl EntityRecord {
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }
}

/// Name + URL pair for a move referenced by an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRef {
    pub name: String,
    pub url: String,
}

/// The sprite URLs an entity exposes, in the order a detail view shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSet {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    pub front_shiny: Option<String>,
    pub official_artwork: Option<String>,
    pub home_front: Option<String>,
    pub home_front_shiny: Option<String>,
}

impl SpriteSet {
    /// All present sprite URLs, detail-view order.
    pub fn gallery(&self) -> Vec<&str> {
        [
            &self.front_default,
            &self.back_default,
            &self.front_shiny,
            &self.official_artwork,
            &self.home_front,
            &self.home_front_shiny,
        ]
        .into_iter()
        .filter_map(|s| s.as_deref())
        .collect()
    }
}

/// Detail payload for one move, keyed by its source URL.
///
/// The default value doubles as the sentinel returned when a move lookup
/// fails: every field empty, nothing cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub name: String,
    pub type_name: String,
    pub power: Option<u32>,
    pub accuracy: Option<u32>,
    pub pp: Option<u32>,
    pub effect_text: String,
}

/// Extract the numeric id from an entry's source URL.
///
/// Accepts `…/pokemon/{id}` with or without a trailing slash; anything else
/// (including a zero id) yields `None` and the entry is skipped.
pub fn id_from_url(url: &str) -> Option<u32> {
    let trimmed = url.trim_end_matches('/');
    let (rest, last) = trimmed.rsplit_once('/')?;
    let parent = rest.rsplit('/').next()?;
    if parent != "pokemon" {
        return None;
    }
    let id: u32 = last.parse().ok()?;
    (id > 0).then_some(id)
}
