//! HTTP client for the remote catalog.
//!
//! Every call is one bounded-time GET with its own deadline; aborting one
//! request never affects another in flight.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use rotomdex_core::{EntityRecord, Entry, MoveRecord};

use crate::ApiError;
use crate::wire::{
    EncounterRow, EntityResponse, EvolutionChainResponse, MoveResponse, PageResponse,
    SpeciesResponse,
};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// First page is sized for fast first paint.
pub const FIRST_PAGE_SIZE: usize = 300;

/// Per-request response bound.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(12);

/// One decoded catalog page: parsed entries plus the continuation URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    pub entries: Vec<Entry>,
    pub next: Option<String>,
}

/// Client for the remote catalog API.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the eager first page.
    pub fn first_page_url(&self) -> String {
        format!("{}/pokemon?limit={}", self.base_url, FIRST_PAGE_SIZE)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url = %url, "fetching");
        let resp = self.client.get(url).timeout(FETCH_TIMEOUT).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch and decode one catalog page.
    pub async fn fetch_page(&self, url: &str) -> Result<CatalogPage, ApiError> {
        let page: PageResponse = self.get_json(url).await?;
        Ok(CatalogPage {
            entries: page.entries(),
            next: page.next,
        })
    }

    /// Fetch the full detail record for one entity.
    pub async fn fetch_entity(&self, id: u32) -> Result<EntityRecord, ApiError> {
        let url = format!("{}/pokemon/{id}", self.base_url);
        let resp: EntityResponse = self.get_json(&url).await?;
        Ok(resp.into())
    }

    /// Fetch one move record by its source URL.
    pub async fn fetch_move(&self, url: &str) -> Result<MoveRecord, ApiError> {
        let resp: MoveResponse = self.get_json(url).await?;
        Ok(resp.into())
    }

    /// Location-area names where the entity can be encountered.
    pub async fn fetch_encounters(&self, id: u32) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/pokemon/{id}/encounters", self.base_url);
        let rows: Vec<EncounterRow> = self.get_json(&url).await?;
        Ok(rows.into_iter().map(|r| r.location_area.name).collect())
    }

    /// Resolve a species URL to its flattened evolution chain.
    ///
    /// Returns an empty list when the species carries no chain pointer.
    pub async fn fetch_evolution_names(&self, species_url: &str) -> Result<Vec<String>, ApiError> {
        let species: SpeciesResponse = self.get_json(species_url).await?;
        let Some(pointer) = species.evolution_chain else {
            return Ok(Vec::new());
        };
        let chain: EvolutionChainResponse = self.get_json(&pointer.url).await?;
        Ok(chain.names())
    }
}
