use crate::storage::payload::{GamePayload, GameUpdate};
use crate::storage::records::{GameId, HistoricalGameRecord, HistoricalPlayerStat, StoredGame};
use crate::storage::storage_error::StorageError;

/// Persistence boundary for finished games.
///
/// Implementations own id assignment, never reuse the id of a deleted game or
/// row, and must delete a game's player rows together with the game.
pub trait GameStore {
    /// Writes a new game and its player rows, returning the assigned game id.
    fn insert_game(&mut self, payload: &GamePayload) -> Result<GameId, StorageError>;

    /// Replaces the game row and the listed player rows of an existing game.
    ///
    /// The stored home score is recomputed over all of the game's rows after
    /// the listed ones are swapped in, so it always equals their point sum.
    fn update_game(&mut self, update: &GameUpdate) -> Result<(), StorageError>;

    /// Deletes a game and every player row that belongs to it.
    fn delete_game(&mut self, game_id: GameId) -> Result<(), StorageError>;

    /// All games, newest date first, then newest insert first within a date.
    fn list_games(&self) -> Result<Vec<HistoricalGameRecord>, StorageError>;

    /// One game with its player rows ordered by total points, highest first.
    fn load_game(&self, game_id: GameId) -> Result<StoredGame, StorageError>;

    /// Every stored player row across all games, oldest game first.
    fn all_player_stats(&self) -> Result<Vec<HistoricalPlayerStat>, StorageError>;

    /// Player names of the most recently inserted game, sorted by name.
    ///
    /// Returns an empty list when nothing has been stored yet.
    fn last_game_player_names(&self) -> Result<Vec<String>, StorageError> {
        let latest = self
            .list_games()?
            .into_iter()
            .max_by_key(|game| (game.created_at, game.id));
        let Some(latest) = latest else {
            return Ok(Vec::new());
        };

        let mut names: Vec<String> = self
            .load_game(latest.id)?
            .players
            .into_iter()
            .map(|row| row.player_name)
            .collect();
        names.sort();
        Ok(names)
    }
}
