use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the catalog loader and the recipe store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate recipe id: {0}")]
    DuplicateId(String),

    #[error("Recipe not found: {0}")]
    UnknownRecipe(String),

    #[error("cannot persist state: {0}")]
    Persist(#[from] std::io::Error),

    #[error("cannot encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
