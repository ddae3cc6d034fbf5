//! Local persistence: preferences file and the favorites set stored in it.

pub mod favorites;
pub mod preferences;

pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use preferences::Preferences;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("symbol must not be empty")]
    EmptySymbol,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}
