//! Persistence boundary: record shapes, payload builders and the JSON file store.

pub mod game_store;
pub mod json_store;
pub mod payload;
pub mod records;
pub mod storage_error;

pub use game_store::GameStore;
pub use json_store::JsonFileStore;
pub use payload::{build_game_payload, build_game_update, GamePayload, GameUpdate};
pub use records::{
    GameId, HistoricalGameRecord, HistoricalPlayerStat, NewGameRecord, NewPlayerRecord,
    PlayerRecordId, StoredGame,
};
pub use storage_error::StorageError;
