//! Remote catalog access: one bounded-time GET per call, typed errors,
//! wire-format decoding into the core domain types.

mod error;
pub mod http;
pub mod wire;

pub use error::ApiError;
pub use http::{ApiClient, CatalogPage, DEFAULT_BASE_URL, FETCH_TIMEOUT, FIRST_PAGE_SIZE};
