use crate::ledger::ledger_error::{LedgerError, UndoOutcome};
use crate::ledger::player_game_stat::{PlayerGameStat, PlayerId, ShotValue, TeamSide};
use crate::ledger::stat_counters::Counter;
use crate::ledger::team_score::TeamScore;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Authoritative record of the game in progress.
///
/// Holds one [`PlayerGameStat`] per home player plus both team scores. The
/// ledger is only mutated through the record/undo operations below, which keep
/// three invariants after every call:
///
/// - made shots never exceed attempted shots for either shot value,
/// - the home score equals the points implied by the home players' made shots,
/// - no counter or score is ever negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLedger {
    players: BTreeMap<PlayerId, PlayerGameStat>,
    score: TeamScore,
}

/// Value copy of a ledger at one point in time.
///
/// # Fields
///
/// * `players` - Player lines in roster order.
/// * `score` - Both team scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub players: Vec<PlayerGameStat>,
    pub score: TeamScore,
}

impl LedgerSnapshot {
    pub fn player(&self, player_id: PlayerId) -> Option<&PlayerGameStat> {
        self.players.iter().find(|p| p.player_id == player_id)
    }
}

impl GameLedger {
    /// Locks a roster and creates an empty ledger for it.
    ///
    /// Player ids are assigned in iteration order starting from zero.
    ///
    /// # Arguments
    ///
    /// * `names` - Display names of the home players, already validated by the caller.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ledger = Self {
            players: BTreeMap::new(),
            score: TeamScore::default(),
        };
        for name in names {
            ledger.add_player(name);
        }
        ledger
    }

    /// Adds a late-arriving player with zeroed counters and returns their id.
    pub fn add_player(&mut self, name: impl Into<String>) -> PlayerId {
        let player_id = self
            .players
            .keys()
            .next_back()
            .map_or(PlayerId(0), |last| PlayerId(last.0 + 1));
        let stat = PlayerGameStat::new(player_id, name);
        debug!(player = %player_id, name = %stat.name, "player added to ledger");
        self.players.insert(player_id, stat);
        player_id
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&PlayerGameStat> {
        self.players.get(&player_id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<PlayerId> {
        self.players
            .values()
            .find(|p| p.name == name)
            .map(|p| p.player_id)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerGameStat> {
        self.players.values()
    }

    pub fn score(&self) -> TeamScore {
        self.score
    }

    fn player_mut(&mut self, player_id: PlayerId) -> Result<&mut PlayerGameStat, LedgerError> {
        self.players
            .get_mut(&player_id)
            .ok_or(LedgerError::UnknownPlayer(player_id))
    }

    /// Increments a non-shot counter for a player. No effect on the score.
    pub fn record_counter_event(
        &mut self,
        player_id: PlayerId,
        counter: Counter,
    ) -> Result<(), LedgerError> {
        let player = self.player_mut(player_id)?;
        *player.counters.counter_mut(counter) += 1;
        debug!(player = %player_id, %counter, "counter recorded");
        Ok(())
    }

    /// Decrements a non-shot counter, clamped at zero.
    pub fn undo_counter_event(
        &mut self,
        player_id: PlayerId,
        counter: Counter,
    ) -> Result<UndoOutcome, LedgerError> {
        let player = self.player_mut(player_id)?;
        let value = player.counters.counter_mut(counter);
        if *value == 0 {
            warn!(player = %player_id, %counter, "undo ignored, counter already zero");
            return Ok(UndoOutcome::ClampedNoOp);
        }
        *value -= 1;
        debug!(player = %player_id, %counter, "counter undone");
        Ok(UndoOutcome::Applied)
    }

    /// Records a field goal attempt.
    ///
    /// The attempted counter always moves; the made counter and the scoring
    /// side's score move only when the shot went in.
    ///
    /// # Arguments
    ///
    /// * `player_id` - The shooter.
    /// * `shot` - Two or three points.
    /// * `made` - Whether the shot was converted.
    ///
    /// # Returns
    ///
    /// `Err(LedgerError::UnknownPlayer)` if the shooter is not on this ledger.
    pub fn record_shot(
        &mut self,
        player_id: PlayerId,
        shot: ShotValue,
        made: bool,
    ) -> Result<(), LedgerError> {
        let player = self.player_mut(player_id)?;
        let side = player.team_side;
        let (made_count, attempted_count) = player.made_and_attempted_mut(shot);
        *attempted_count += 1;
        if made {
            *made_count += 1;
            self.score.add(side, shot.points());
        }
        debug!(player = %player_id, points = shot.points(), made, "shot recorded");
        Ok(())
    }

    /// Reverses one [`record_shot`](Self::record_shot) call with the same arguments.
    ///
    /// Undoing a make removes one make, one attempt and the shot's points.
    /// Undoing a miss removes one attempt only when the player has an attempt
    /// that is not a make, so `made <= attempted` keeps holding. Anything else
    /// is reported as [`UndoOutcome::ClampedNoOp`] and leaves the ledger untouched.
    ///
    /// # Arguments
    ///
    /// * `player_id` - The shooter.
    /// * `shot` - Two or three points.
    /// * `was_made` - Whether the shot being reversed went in.
    ///
    /// # Returns
    ///
    /// The undo outcome, or `Err(LedgerError::UnknownPlayer)`.
    pub fn undo_shot(
        &mut self,
        player_id: PlayerId,
        shot: ShotValue,
        was_made: bool,
    ) -> Result<UndoOutcome, LedgerError> {
        let player = self.player_mut(player_id)?;
        let side = player.team_side;
        let (made_count, attempted_count) = player.made_and_attempted_mut(shot);

        let removable = if was_made {
            *made_count > 0
        } else {
            *attempted_count > *made_count
        };
        if !removable {
            warn!(player = %player_id, points = shot.points(), was_made, "undo ignored, nothing to remove");
            return Ok(UndoOutcome::ClampedNoOp);
        }

        *attempted_count -= 1;
        if was_made {
            *made_count -= 1;
            self.score.subtract_clamped(side, shot.points());
        }
        debug!(player = %player_id, points = shot.points(), was_made, "shot undone");
        Ok(UndoOutcome::Applied)
    }

    /// Adds points to the away side, which has no per-player breakdown.
    pub fn record_away_team_points(&mut self, points: u32) {
        self.score.add(TeamSide::Away, points);
        debug!(points, away = self.score.away, "away points recorded");
    }

    /// Removes points from the away side, clamping the score at zero.
    pub fn undo_away_team_points(&mut self, points: u32) -> UndoOutcome {
        if points == 0 || !self.score.subtract_clamped(TeamSide::Away, points) {
            warn!(points, "undo ignored, away score already zero");
            return UndoOutcome::ClampedNoOp;
        }
        debug!(points, away = self.score.away, "away points undone");
        UndoOutcome::Applied
    }

    /// Copies every counter and score out of the ledger.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            players: self.players.values().cloned().collect(),
            score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::percentage;

    fn ledger() -> GameLedger {
        GameLedger::new(["Alice", "Bob"])
    }

    const ALICE: PlayerId = PlayerId(0);
    const BOB: PlayerId = PlayerId(1);

    fn home_points(ledger: &GameLedger) -> u32 {
        ledger.players().map(|p| p.total_points()).sum()
    }

    #[test]
    fn roster_order_assigns_ids() {
        let ledger = ledger();
        assert_eq!(ledger.player(ALICE).unwrap().name, "Alice");
        assert_eq!(ledger.player(BOB).unwrap().name, "Bob");
        assert_eq!(ledger.find_by_name("Bob"), Some(BOB));
        assert_eq!(ledger.score(), TeamScore::default());
    }

    #[test]
    fn made_two_then_undo_restores_everything() {
        let mut ledger = ledger();
        ledger.record_shot(ALICE, ShotValue::Two, true).unwrap();
        assert_eq!(ledger.score().home, 2);

        let outcome = ledger.undo_shot(ALICE, ShotValue::Two, true).unwrap();
        assert_eq!(outcome, UndoOutcome::Applied);

        let alice = ledger.player(ALICE).unwrap();
        assert_eq!(alice.counters.two_point_made, 0);
        assert_eq!(alice.counters.two_point_attempted, 0);
        assert_eq!(ledger.score().home, 0);
    }

    #[test]
    fn three_misses_and_a_make() {
        let mut ledger = ledger();
        for _ in 0..3 {
            ledger.record_shot(ALICE, ShotValue::Three, false).unwrap();
        }
        ledger.record_shot(ALICE, ShotValue::Three, true).unwrap();

        let alice = ledger.player(ALICE).unwrap();
        assert_eq!(alice.counters.three_point_attempted, 4);
        assert_eq!(alice.counters.three_point_made, 1);
        assert_eq!(ledger.score().home, 3);
        assert_eq!(
            percentage(
                alice.counters.three_point_made,
                alice.counters.three_point_attempted
            ),
            25
        );
    }

    #[test]
    fn undo_make_without_makes_is_a_no_op() {
        let mut ledger = ledger();
        ledger.record_shot(ALICE, ShotValue::Two, false).unwrap();

        let outcome = ledger.undo_shot(ALICE, ShotValue::Two, true).unwrap();
        assert_eq!(outcome, UndoOutcome::ClampedNoOp);
        assert_eq!(ledger.player(ALICE).unwrap().counters.two_point_attempted, 1);
        assert_eq!(ledger.score().home, 0);
    }

    #[test]
    fn undo_miss_never_removes_a_make() {
        let mut ledger = ledger();
        ledger.record_shot(BOB, ShotValue::Three, true).unwrap();

        let outcome = ledger.undo_shot(BOB, ShotValue::Three, false).unwrap();
        assert_eq!(outcome, UndoOutcome::ClampedNoOp);

        let bob = ledger.player(BOB).unwrap();
        assert_eq!(bob.counters.three_point_made, 1);
        assert_eq!(bob.counters.three_point_attempted, 1);
        assert_eq!(ledger.score().home, home_points(&ledger));
    }

    #[test]
    fn out_of_order_undo_of_a_make_is_accepted() {
        let mut ledger = ledger();
        ledger.record_shot(ALICE, ShotValue::Two, true).unwrap();
        ledger.record_shot(ALICE, ShotValue::Two, false).unwrap();

        // The latest event was a miss, but undoing a make still succeeds.
        let outcome = ledger.undo_shot(ALICE, ShotValue::Two, true).unwrap();
        assert_eq!(outcome, UndoOutcome::Applied);

        let alice = ledger.player(ALICE).unwrap();
        assert_eq!(alice.counters.two_point_made, 0);
        assert_eq!(alice.counters.two_point_attempted, 1);
        assert_eq!(ledger.score().home, 0);
    }

    #[test]
    fn counters_clamp_at_zero() {
        let mut ledger = ledger();
        ledger.record_counter_event(BOB, Counter::Fouls).unwrap();

        assert!(ledger.undo_counter_event(BOB, Counter::Fouls).unwrap().is_applied());
        assert_eq!(
            ledger.undo_counter_event(BOB, Counter::Fouls).unwrap(),
            UndoOutcome::ClampedNoOp
        );
        assert_eq!(ledger.player(BOB).unwrap().counters.fouls, 0);
    }

    #[test]
    fn unknown_player_is_reported() {
        let mut ledger = ledger();
        let ghost = PlayerId(9);

        assert_eq!(
            ledger.record_counter_event(ghost, Counter::Steals),
            Err(LedgerError::UnknownPlayer(ghost))
        );
        assert_eq!(
            ledger.undo_counter_event(ghost, Counter::Steals),
            Err(LedgerError::UnknownPlayer(ghost))
        );
        assert_eq!(
            ledger.record_shot(ghost, ShotValue::Two, true),
            Err(LedgerError::UnknownPlayer(ghost))
        );
        assert_eq!(
            ledger.undo_shot(ghost, ShotValue::Two, true),
            Err(LedgerError::UnknownPlayer(ghost))
        );
        assert_eq!(ledger.score(), TeamScore::default());
    }

    #[test]
    fn away_points_clamp_on_undo() {
        let mut ledger = ledger();
        ledger.record_away_team_points(2);
        assert_eq!(ledger.undo_away_team_points(3), UndoOutcome::Applied);
        assert_eq!(ledger.score().away, 0);
        assert_eq!(ledger.undo_away_team_points(1), UndoOutcome::ClampedNoOp);
        assert_eq!(ledger.score().away, 0);
    }

    #[test]
    fn snapshot_is_detached_from_later_events() {
        let mut ledger = ledger();
        ledger.record_shot(ALICE, ShotValue::Three, true).unwrap();
        let before = ledger.snapshot();

        ledger.record_shot(ALICE, ShotValue::Three, true).unwrap();
        ledger.record_counter_event(ALICE, Counter::Assists).unwrap();

        let alice = before.player(ALICE).unwrap();
        assert_eq!(alice.counters.three_point_made, 1);
        assert_eq!(alice.counters.assists, 0);
        assert_eq!(before.score.home, 3);
        assert_eq!(ledger.snapshot().score.home, 6);
    }

    #[test]
    fn late_player_gets_next_id() {
        let mut ledger = ledger();
        let carol = ledger.add_player("Carol");
        assert_eq!(carol, PlayerId(2));
        ledger.record_shot(carol, ShotValue::Two, true).unwrap();
        assert_eq!(ledger.snapshot().players.len(), 3);
        assert_eq!(ledger.score().home, 2);
    }
}
