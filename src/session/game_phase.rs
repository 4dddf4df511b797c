use crate::ledger::{GameLedger, PlayerId, TeamScore, UndoOutcome};
use crate::session::game_event::GameEvent;
use crate::session::game_setup::{GameInfo, GameSetup};
use crate::session::session_error::SessionError;
use crate::storage::{build_game_payload, GameId, GameStore};

use tracing::{info, warn};

/// A game being tracked: its details, the ledger and who is on the court.
#[derive(Debug, Clone)]
pub struct LiveGame {
    info: GameInfo,
    ledger: GameLedger,
    on_court: Vec<PlayerId>,
}

impl LiveGame {
    pub(crate) fn new(info: GameInfo, ledger: GameLedger) -> Self {
        let on_court = ledger.players().map(|p| p.player_id).collect();
        Self {
            info,
            ledger,
            on_court,
        }
    }

    pub fn info(&self) -> &GameInfo {
        &self.info
    }

    pub fn ledger(&self) -> &GameLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut GameLedger {
        &mut self.ledger
    }

    pub fn on_court(&self) -> &[PlayerId] {
        &self.on_court
    }

    /// Swaps a player off the court for `name`.
    ///
    /// If `name` already has a line in the ledger that line is reused,
    /// otherwise a new player is added. The benched player keeps their stats.
    ///
    /// # Arguments
    ///
    /// * `out` - Player leaving the court.
    /// * `name` - Player coming on.
    ///
    /// # Returns
    ///
    /// The id of the incoming player.
    pub fn substitute(&mut self, out: PlayerId, name: &str) -> Result<PlayerId, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::BlankPlayerName);
        }
        let slot = self
            .on_court
            .iter()
            .position(|id| *id == out)
            .ok_or(SessionError::NotOnCourt(out))?;

        let incoming = match self.ledger.find_by_name(name) {
            Some(id) if self.on_court.contains(&id) => {
                return Err(SessionError::AlreadyOnCourt(name.to_string()))
            }
            Some(id) => id,
            None => self.ledger.add_player(name),
        };

        if let Some(entry) = self.on_court.get_mut(slot) {
            *entry = incoming;
        }
        info!(out = %out, incoming = %incoming, name, "substitution");
        Ok(incoming)
    }

    /// Roster to offer when this game is thrown away or a new one is set up.
    fn next_setup(&self) -> GameSetup {
        GameSetup {
            info: self.info.clone(),
            player_names: self.ledger.players().map(|p| p.name.clone()).collect(),
        }
    }
}

/// A game that has been written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedGame {
    pub game_id: GameId,
    pub info: GameInfo,
    pub final_score: TeamScore,
    pub player_names: Vec<String>,
}

/// Where a session currently is.
#[derive(Debug, Clone)]
pub enum GamePhase {
    Setup(GameSetup),
    Live(LiveGame),
    Finished(FinishedGame),
}

impl GamePhase {
    pub fn name(&self) -> &'static str {
        match self {
            GamePhase::Setup(_) => "setup",
            GamePhase::Live(_) => "live",
            GamePhase::Finished(_) => "finished",
        }
    }
}

/// One operator session: setup, live tracking, then save or discard.
///
/// Owns the current [`GamePhase`]; each operation checks the phase it needs
/// and reports [`SessionError::WrongPhase`] otherwise.
#[derive(Debug, Clone)]
pub struct Session {
    phase: GamePhase,
}

impl Session {
    pub fn new(setup: GameSetup) -> Self {
        Self {
            phase: GamePhase::Setup(setup),
        }
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    fn wrong_phase(&self, expected: &'static str) -> SessionError {
        SessionError::WrongPhase {
            expected,
            found: self.phase.name(),
        }
    }

    pub fn setup_mut(&mut self) -> Result<&mut GameSetup, SessionError> {
        let found = self.phase.name();
        match &mut self.phase {
            GamePhase::Setup(setup) => Ok(setup),
            _ => Err(SessionError::WrongPhase {
                expected: "setup",
                found,
            }),
        }
    }

    /// Locks the roster and moves the session into live tracking.
    pub fn start(&mut self) -> Result<&mut LiveGame, SessionError> {
        let GamePhase::Setup(setup) = &self.phase else {
            return Err(self.wrong_phase("setup"));
        };
        let live = setup.lock()?;
        info!(
            home = %live.info.home_team_name,
            away = %live.info.away_team_name,
            players = live.on_court.len(),
            "roster locked"
        );
        self.phase = GamePhase::Live(live);
        self.live_mut()
    }

    pub fn live(&self) -> Result<&LiveGame, SessionError> {
        match &self.phase {
            GamePhase::Live(live) => Ok(live),
            _ => Err(self.wrong_phase("live")),
        }
    }

    pub fn live_mut(&mut self) -> Result<&mut LiveGame, SessionError> {
        let found = self.phase.name();
        match &mut self.phase {
            GamePhase::Live(live) => Ok(live),
            _ => Err(SessionError::WrongPhase {
                expected: "live",
                found,
            }),
        }
    }

    /// Applies one operator action to the live game.
    ///
    /// # Returns
    ///
    /// `UndoOutcome::Applied` for every record or substitution, and the
    /// ledger's outcome for undo actions.
    pub fn apply(&mut self, event: &GameEvent) -> Result<UndoOutcome, SessionError> {
        let live = self.live_mut()?;
        let outcome = match event {
            GameEvent::Shot {
                player,
                value,
                made,
            } => {
                live.ledger.record_shot(*player, *value, *made)?;
                UndoOutcome::Applied
            }
            GameEvent::UndoShot {
                player,
                value,
                was_made,
            } => live.ledger.undo_shot(*player, *value, *was_made)?,
            GameEvent::Stat { player, counter } => {
                live.ledger.record_counter_event(*player, *counter)?;
                UndoOutcome::Applied
            }
            GameEvent::UndoStat { player, counter } => {
                live.ledger.undo_counter_event(*player, *counter)?
            }
            GameEvent::AwayPoints { points } => {
                live.ledger.record_away_team_points(*points);
                UndoOutcome::Applied
            }
            GameEvent::UndoAwayPoints { points } => live.ledger.undo_away_team_points(*points),
            GameEvent::Substitute { out, name } => {
                live.substitute(*out, name)?;
                UndoOutcome::Applied
            }
        };
        Ok(outcome)
    }

    /// Writes the live game to `store` and finishes the session.
    ///
    /// The live game is kept as-is when the store reports an error, so the
    /// operator can retry without losing anything.
    ///
    /// # Returns
    ///
    /// The id the store assigned to the game.
    pub fn finalize<S: GameStore + ?Sized>(&mut self, store: &mut S) -> Result<GameId, SessionError> {
        let live = self.live()?;
        let payload = build_game_payload(&live.info, &live.ledger.snapshot());

        let game_id = match store.insert_game(&payload) {
            Ok(game_id) => game_id,
            Err(err) => {
                warn!(error = %err, "save failed, live game kept");
                return Err(err.into());
            }
        };

        let finished = FinishedGame {
            game_id,
            info: live.info.clone(),
            final_score: live.ledger.score(),
            player_names: live.ledger.players().map(|p| p.name.clone()).collect(),
        };
        info!(
            game_id,
            home = finished.final_score.home,
            away = finished.final_score.away,
            "game saved"
        );
        self.phase = GamePhase::Finished(finished);
        Ok(game_id)
    }

    /// Throws the live game away and returns to setup with the same teams and roster.
    pub fn discard(&mut self) -> Result<(), SessionError> {
        let setup = self.live()?.next_setup();
        info!("live game discarded");
        self.phase = GamePhase::Setup(setup);
        Ok(())
    }

    /// Leaves a finished game and prepares the next one on `date`.
    pub fn new_game(&mut self, date: chrono::NaiveDate) -> Result<&mut GameSetup, SessionError> {
        let GamePhase::Finished(finished) = &self.phase else {
            return Err(self.wrong_phase("finished"));
        };
        let mut info = finished.info.clone();
        info.date = date;
        let setup = GameSetup {
            info,
            player_names: finished.player_names.clone(),
        };
        self.phase = GamePhase::Setup(setup);
        self.setup_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Counter, ShotValue};
    use crate::storage::{
        GamePayload, GameUpdate, HistoricalGameRecord, HistoricalPlayerStat, StorageError,
        StoredGame,
    };
    use chrono::NaiveDate;

    /// Store that accepts inserts until told to fail.
    #[derive(Default)]
    struct RecordingStore {
        fail: bool,
        inserted: Vec<GamePayload>,
    }

    impl GameStore for RecordingStore {
        fn insert_game(&mut self, payload: &GamePayload) -> Result<GameId, StorageError> {
            if self.fail {
                return Err(StorageError::io(
                    "games/game-1.json",
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
            self.inserted.push(payload.clone());
            Ok(self.inserted.len() as GameId)
        }

        fn update_game(&mut self, _update: &GameUpdate) -> Result<(), StorageError> {
            Ok(())
        }

        fn delete_game(&mut self, game_id: GameId) -> Result<(), StorageError> {
            Err(StorageError::GameNotFound(game_id))
        }

        fn list_games(&self) -> Result<Vec<HistoricalGameRecord>, StorageError> {
            Ok(Vec::new())
        }

        fn load_game(&self, game_id: GameId) -> Result<StoredGame, StorageError> {
            Err(StorageError::GameNotFound(game_id))
        }

        fn all_player_stats(&self) -> Result<Vec<HistoricalPlayerStat>, StorageError> {
            Ok(Vec::new())
        }
    }

    fn session() -> Session {
        let setup = GameSetup::new(NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(), "Hawks", "Owls")
            .with_players(["Alice", "Bob"]);
        Session::new(setup)
    }

    #[test]
    fn live_operations_need_a_started_game() {
        let mut session = session();
        let err = session
            .apply(&GameEvent::AwayPoints { points: 2 })
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::WrongPhase {
                expected: "live",
                found: "setup"
            }
        ));

        session.start().unwrap();
        assert!(matches!(session.start(), Err(SessionError::WrongPhase { .. })));
    }

    #[test]
    fn apply_routes_events_to_the_ledger() {
        let mut session = session();
        session.start().unwrap();

        session
            .apply(&GameEvent::Shot {
                player: PlayerId(0),
                value: ShotValue::Two,
                made: true,
            })
            .unwrap();
        session
            .apply(&GameEvent::Stat {
                player: PlayerId(1),
                counter: Counter::Steals,
            })
            .unwrap();
        let outcome = session
            .apply(&GameEvent::UndoStat {
                player: PlayerId(0),
                counter: Counter::Steals,
            })
            .unwrap();
        assert_eq!(outcome, UndoOutcome::ClampedNoOp);

        let err = session
            .apply(&GameEvent::Stat {
                player: PlayerId(7),
                counter: Counter::Steals,
            })
            .unwrap_err();
        assert!(matches!(err, SessionError::Ledger(_)));

        let ledger = session.live().unwrap().ledger();
        assert_eq!(ledger.score().home, 2);
        assert_eq!(ledger.player(PlayerId(1)).unwrap().counters.steals, 1);
    }

    #[test]
    fn substitution_keeps_benched_stats() {
        let mut session = session();
        let live = session.start().unwrap();
        live.ledger_mut()
            .record_shot(PlayerId(1), ShotValue::Three, true)
            .unwrap();

        let carol = live.substitute(PlayerId(1), "Carol").unwrap();
        assert_eq!(live.on_court(), &[PlayerId(0), carol]);
        assert_eq!(live.ledger().player(PlayerId(1)).unwrap().total_points(), 3);

        // Bob comes back on his old line.
        let bob = live.substitute(carol, "Bob").unwrap();
        assert_eq!(bob, PlayerId(1));

        assert!(matches!(
            live.substitute(PlayerId(0), "Bob"),
            Err(SessionError::AlreadyOnCourt(_))
        ));
        assert!(matches!(
            live.substitute(carol, "Dana"),
            Err(SessionError::NotOnCourt(_))
        ));
        assert!(matches!(
            live.substitute(PlayerId(0), "  "),
            Err(SessionError::BlankPlayerName)
        ));
    }

    #[test]
    fn failed_save_keeps_the_live_game() {
        let mut session = session();
        session.start().unwrap();
        session
            .apply(&GameEvent::Shot {
                player: PlayerId(0),
                value: ShotValue::Three,
                made: true,
            })
            .unwrap();

        let mut store = RecordingStore {
            fail: true,
            ..Default::default()
        };
        let err = session.finalize(&mut store).unwrap_err();
        assert!(matches!(err, SessionError::Storage(_)));
        assert_eq!(session.live().unwrap().ledger().score().home, 3);

        store.fail = false;
        let game_id = session.finalize(&mut store).unwrap();
        assert_eq!(game_id, 1);
        assert_eq!(store.inserted.len(), 1);
        assert_eq!(store.inserted[0].game.team_a_score, 3);
        assert_eq!(store.inserted[0].players.len(), 1);

        let GamePhase::Finished(finished) = session.phase() else {
            panic!("expected finished phase, got {}", session.phase().name());
        };
        assert_eq!(finished.final_score.home, 3);
        assert!(session.live().is_err());
    }

    #[test]
    fn discard_returns_to_setup_with_roster() {
        let mut session = session();
        let live = session.start().unwrap();
        live.substitute(PlayerId(0), "Carol").unwrap();
        session.discard().unwrap();

        let setup = session.setup_mut().unwrap();
        assert_eq!(setup.player_names, ["Alice", "Bob", "Carol"]);
        assert_eq!(setup.info.home_team_name, "Hawks");
    }

    #[test]
    fn new_game_after_finish() {
        let mut session = session();
        session.start().unwrap();
        let mut store = RecordingStore::default();
        session.finalize(&mut store).unwrap();

        let next_day = NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
        let setup = session.new_game(next_day).unwrap();
        assert_eq!(setup.info.date, next_day);
        assert_eq!(setup.player_names, ["Alice", "Bob"]);
        assert!(session.discard().is_err());
    }
}
