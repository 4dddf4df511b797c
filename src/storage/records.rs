use crate::ledger::StatCounters;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier the store assigns to a game on insert.
pub type GameId = u64;

/// Identifier the store assigns to a player row on insert.
pub type PlayerRecordId = u64;

/// Game row as handed to the store on finalize, before it has an id.
///
/// # Fields
///
/// * `date` - Calendar day the game was played.
/// * `team_a_name` - Name of the tracked (home) team.
/// * `team_b_name` - Name of the opposing (away) team.
/// * `team_a_score` / `team_b_score` - Final scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameRecord {
    pub date: NaiveDate,
    pub team_a_name: String,
    pub team_b_name: String,
    pub team_a_score: u32,
    pub team_b_score: u32,
}

/// Player row as handed to the store on finalize. The store links it to the
/// game id it assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayerRecord {
    pub player_name: String,
    pub team: String,
    #[serde(flatten)]
    pub counters: StatCounters,
    pub total_points: u32,
}

/// A finalized game as kept by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalGameRecord {
    pub id: GameId,
    pub created_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub team_a_name: String,
    pub team_b_name: String,
    pub team_a_score: u32,
    pub team_b_score: u32,
}

/// One home player's final line for one stored game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalPlayerStat {
    pub id: PlayerRecordId,
    pub game_id: GameId,
    pub player_name: String,
    pub team: String,
    #[serde(flatten)]
    pub counters: StatCounters,
    pub total_points: u32,
}

impl AsRef<StatCounters> for HistoricalPlayerStat {
    fn as_ref(&self) -> &StatCounters {
        &self.counters
    }
}

impl AsRef<StatCounters> for NewPlayerRecord {
    fn as_ref(&self) -> &StatCounters {
        &self.counters
    }
}

/// Game record together with its player rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredGame {
    pub game: HistoricalGameRecord,
    pub players: Vec<HistoricalPlayerStat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_row_uses_flat_column_names() {
        let row = HistoricalPlayerStat {
            id: 7,
            game_id: 2,
            player_name: "Alice".to_string(),
            team: "Home".to_string(),
            counters: StatCounters {
                two_point_made: 1,
                two_point_attempted: 2,
                ..Default::default()
            },
            total_points: 2,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["game_id"], 2);
        assert_eq!(json["two_point_made"], 1);
        assert_eq!(json["two_point_attempted"], 2);
        assert_eq!(json["total_points"], 2);
        assert!(json.get("counters").is_none());
    }
}
