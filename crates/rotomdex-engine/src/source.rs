//! Seams between the engine and the remote API, so the loader and the
//! detail cache can be driven by scripted sources in tests.

use async_trait::async_trait;

use rotomdex_api::{ApiClient, ApiError, CatalogPage};
use rotomdex_core::{EntityRecord, MoveRecord};

/// Supplies catalog pages to the loader.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn first_page(&self) -> Result<CatalogPage, ApiError>;
    async fn page_at(&self, url: &str) -> Result<CatalogPage, ApiError>;
}

/// Supplies detail payloads to the cache.
#[async_trait]
pub trait DetailSource: Send + Sync {
    async fn entity(&self, id: u32) -> Result<EntityRecord, ApiError>;
    async fn move_record(&self, url: &str) -> Result<MoveRecord, ApiError>;
    async fn encounters(&self, id: u32) -> Result<Vec<String>, ApiError>;
    async fn evolution_names(&self, species_url: &str) -> Result<Vec<String>, ApiError>;
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn first_page(&self) -> Result<CatalogPage, ApiError> {
        self.fetch_page(&self.first_page_url()).await
    }

    async fn page_at(&self, url: &str) -> Result<CatalogPage, ApiError> {
        self.fetch_page(url).await
    }
}

#[async_trait]
impl DetailSource for ApiClient {
    async fn entity(&self, id: u32) -> Result<EntityRecord, ApiError> {
        self.fetch_entity(id).await
    }

    async fn move_record(&self, url: &str) -> Result<MoveRecord, ApiError> {
        self.fetch_move(url).await
    }

    async fn encounters(&self, id: u32) -> Result<Vec<String>, ApiError> {
        self.fetch_encounters(id).await
    }

    async fn evolution_names(&self, species_url: &str) -> Result<Vec<String>, ApiError> {
        self.fetch_evolution_names(species_url).await
    }
}
