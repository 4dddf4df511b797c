use crate::ledger::{LedgerSnapshot, StatCounters};
use crate::session::GameInfo;
use crate::storage::records::{
    GameId, HistoricalPlayerStat, NewGameRecord, NewPlayerRecord, StoredGame,
};
use crate::storage::storage_error::StorageError;

use serde::{Deserialize, Serialize};

/// Everything written to the store when a live game is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePayload {
    pub game: NewGameRecord,
    pub players: Vec<NewPlayerRecord>,
}

/// Replacement rows for an already stored game.
///
/// # Fields
///
/// * `game_id` - The game being edited.
/// * `game` - The game row with `team_a_score` recomputed from the player rows.
/// * `players` - Edited player rows, keyed by their existing record ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameUpdate {
    pub game_id: GameId,
    pub game: NewGameRecord,
    pub players: Vec<HistoricalPlayerStat>,
}

/// Builds the insert payload for a finished game.
///
/// Only players with at least one recorded event get a row. Final scores are
/// taken from the snapshot.
///
/// # Arguments
///
/// * `info` - Date and team names of the game.
/// * `snapshot` - Final ledger state.
///
/// # Returns
///
/// A `GamePayload` ready to hand to [`GameStore::insert_game`](crate::storage::GameStore::insert_game).
pub fn build_game_payload(info: &GameInfo, snapshot: &LedgerSnapshot) -> GamePayload {
    let players = snapshot
        .players
        .iter()
        .filter(|stat| stat.counters.has_activity())
        .map(|stat| NewPlayerRecord {
            player_name: stat.name.clone(),
            team: info.home_team_name.clone(),
            counters: stat.counters,
            total_points: stat.total_points(),
        })
        .collect();

    GamePayload {
        game: NewGameRecord {
            date: info.date,
            team_a_name: info.home_team_name.clone(),
            team_b_name: info.away_team_name.clone(),
            team_a_score: snapshot.score.home,
            team_b_score: snapshot.score.away,
        },
        players,
    }
}

/// Builds the update for an edited game.
///
/// Each edited row gets its `total_points` recomputed from its counters. The
/// home score is summed over the whole game after the edit, so rows left out
/// of `edited_players` keep counting with their stored totals. The away score
/// is the explicit override.
///
/// # Arguments
///
/// * `existing` - The stored game being edited, with all of its player rows.
/// * `edited_players` - Edited player rows carrying their existing record ids.
/// * `away_score` - New away score.
///
/// # Returns
///
/// The `GameUpdate`, `StorageError::PlayerRecordNotFound` for a row the game
/// does not have, or `StorageError::InvalidEdit` if a row has more makes than
/// attempts or belongs to another game.
pub fn build_game_update(
    existing: &StoredGame,
    edited_players: Vec<HistoricalPlayerStat>,
    away_score: u32,
) -> Result<GameUpdate, StorageError> {
    let game = &existing.game;
    let mut players = Vec::with_capacity(edited_players.len());
    for mut row in edited_players {
        validate_edited_row(game.id, &row)?;
        if !existing.players.iter().any(|stored| stored.id == row.id) {
            return Err(StorageError::PlayerRecordNotFound {
                game: game.id,
                record: row.id,
            });
        }
        row.total_points = row.counters.total_points();
        players.push(row);
    }

    let team_a_score = home_score_after_edit(&existing.players, &players);

    Ok(GameUpdate {
        game_id: game.id,
        game: NewGameRecord {
            date: game.date,
            team_a_name: game.team_a_name.clone(),
            team_b_name: game.team_b_name.clone(),
            team_a_score,
            team_b_score: away_score,
        },
        players,
    })
}

/// Sum of `total_points` over `stored`, with each row replaced by its edited
/// version when there is one.
fn home_score_after_edit(
    stored: &[HistoricalPlayerStat],
    edited: &[HistoricalPlayerStat],
) -> u32 {
    stored
        .iter()
        .map(|row| {
            edited
                .iter()
                .rev()
                .find(|e| e.id == row.id)
                .unwrap_or(row)
                .total_points
        })
        .sum()
}

fn validate_edited_row(game_id: GameId, row: &HistoricalPlayerStat) -> Result<(), StorageError> {
    if row.game_id != game_id {
        return Err(StorageError::InvalidEdit(format!(
            "record {} belongs to game {}, not {}",
            row.id, row.game_id, game_id
        )));
    }
    let StatCounters {
        two_point_made,
        two_point_attempted,
        three_point_made,
        three_point_attempted,
        ..
    } = row.counters;
    if two_point_made > two_point_attempted || three_point_made > three_point_attempted {
        return Err(StorageError::InvalidEdit(format!(
            "record {} for {} has more makes than attempts",
            row.id, row.player_name
        )));
    }
    Ok(())
}
