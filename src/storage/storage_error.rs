use crate::storage::records::{GameId, PlayerRecordId};

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by a game store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Game not found: {0}")]
    GameNotFound(GameId),

    #[error("Player record {record} does not belong to game {game}")]
    PlayerRecordNotFound { game: GameId, record: PlayerRecordId },

    #[error("Invalid edit: {0}")]
    InvalidEdit(String),

    #[error("Could not build reader pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
