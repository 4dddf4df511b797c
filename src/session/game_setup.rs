use crate::ledger::GameLedger;
use crate::session::game_phase::LiveGame;
use crate::session::session_error::SessionError;
use crate::storage::{GameStore, StorageError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date and team names of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub date: NaiveDate,
    pub home_team_name: String,
    pub away_team_name: String,
}

/// Everything entered before tip-off.
///
/// # Fields
///
/// * `info` - Date and team names.
/// * `player_names` - Home roster as typed; blank entries are allowed here and
///   dropped when the game starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    pub info: GameInfo,
    pub player_names: Vec<String>,
}

impl GameSetup {
    pub fn new(
        date: NaiveDate,
        home_team_name: impl Into<String>,
        away_team_name: impl Into<String>,
    ) -> Self {
        Self {
            info: GameInfo {
                date,
                home_team_name: home_team_name.into(),
                away_team_name: away_team_name.into(),
            },
            player_names: Vec::new(),
        }
    }

    pub fn with_players<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.player_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Starts a setup pre-filled with the roster of the most recently stored game.
    ///
    /// # Arguments
    ///
    /// * `store` - Where previous games live.
    /// * `date`, `home_team_name`, `away_team_name` - Details of the new game.
    ///
    /// # Returns
    ///
    /// The setup, with an empty roster if nothing has been stored yet.
    pub fn from_previous_roster<S: GameStore + ?Sized>(
        store: &S,
        date: NaiveDate,
        home_team_name: impl Into<String>,
        away_team_name: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let names = store.last_game_player_names()?;
        Ok(Self::new(date, home_team_name, away_team_name).with_players(names))
    }

    /// Trimmed, non-blank player names in entry order.
    pub fn roster(&self) -> Result<Vec<String>, SessionError> {
        let roster: Vec<String> = self
            .player_names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        if roster.is_empty() {
            return Err(SessionError::EmptyRoster);
        }
        Ok(roster)
    }

    /// Locks the roster and creates the live game.
    pub(crate) fn lock(&self) -> Result<LiveGame, SessionError> {
        let roster = self.roster()?;
        let ledger = GameLedger::new(roster.iter().cloned());
        Ok(LiveGame::new(self.info.clone(), ledger))
    }
}
