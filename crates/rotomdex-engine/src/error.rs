use thiserror::Error;

use rotomdex_api::ApiError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("entity {0} has no species link")]
    NoSpecies(u32),
}
