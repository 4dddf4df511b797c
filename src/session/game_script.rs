use crate::session::game_event::GameEvent;
use crate::session::game_phase::Session;
use crate::session::game_setup::GameSetup;
use crate::session::session_error::SessionError;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A recorded game: roster plus the operator's actions in order.
///
/// Team names and date are optional so a script can rely on configured defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScript {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub home_team_name: Option<String>,
    #[serde(default)]
    pub away_team_name: Option<String>,
    pub players: Vec<String>,
    #[serde(default)]
    pub events: Vec<GameEvent>,
}

/// Fallbacks for the optional parts of a script.
#[derive(Debug, Clone)]
pub struct ScriptDefaults {
    pub date: NaiveDate,
    pub home_team_name: String,
    pub away_team_name: String,
}

impl GameScript {
    pub fn setup(&self, defaults: &ScriptDefaults) -> GameSetup {
        GameSetup::new(
            self.date.unwrap_or(defaults.date),
            self.home_team_name
                .clone()
                .unwrap_or_else(|| defaults.home_team_name.clone()),
            self.away_team_name
                .clone()
                .unwrap_or_else(|| defaults.away_team_name.clone()),
        )
        .with_players(self.players.iter().cloned())
    }

    /// Starts a session from this script and replays every event into it.
    ///
    /// Stops at the first event the session rejects.
    ///
    /// # Returns
    ///
    /// The live session, ready to be rendered or finalized.
    pub fn replay(&self, defaults: &ScriptDefaults) -> Result<Session, SessionError> {
        let mut session = Session::new(self.setup(defaults));
        session.start()?;
        for (index, event) in self.events.iter().enumerate() {
            let outcome = session.apply(event)?;
            debug!(index, ?outcome, "script event applied");
        }
        Ok(session)
    }
}
