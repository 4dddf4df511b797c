use crate::ledger::ledger_error::LedgerError;
use crate::ledger::stat_counters::StatCounters;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a player within one game, assigned in roster order at roster lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "home-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

/// Value of a field goal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ShotValue {
    Two,
    Three,
}

impl ShotValue {
    pub fn points(self) -> u32 {
        match self {
            ShotValue::Two => 2,
            ShotValue::Three => 3,
        }
    }
}

impl TryFrom<u8> for ShotValue {
    type Error = LedgerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ShotValue::Two),
            3 => Ok(ShotValue::Three),
            other => Err(LedgerError::InvalidShotValue(other)),
        }
    }
}

impl From<ShotValue> for u8 {
    fn from(value: ShotValue) -> Self {
        match value {
            ShotValue::Two => 2,
            ShotValue::Three => 3,
        }
    }
}

/// Live statistics for one rostered player in the game in progress.
///
/// # Fields
///
/// * `player_id` - Identifier assigned at roster lock, unique within the game.
/// * `name` - Display name.
/// * `team_side` - Always `Home` for ledger entries; the away side only has a team score.
/// * `counters` - Shot and event counters, all starting at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerGameStat {
    pub player_id: PlayerId,
    pub name: String,
    pub team_side: TeamSide,
    #[serde(flatten)]
    pub counters: StatCounters,
}

impl PlayerGameStat {
    pub fn new(player_id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            player_id,
            name: name.into(),
            team_side: TeamSide::Home,
            counters: StatCounters::default(),
        }
    }

    pub fn total_points(&self) -> u32 {
        self.counters.total_points()
    }

    pub(crate) fn made_and_attempted_mut(&mut self, shot: ShotValue) -> (&mut u32, &mut u32) {
        match shot {
            ShotValue::Two => (
                &mut self.counters.two_point_made,
                &mut self.counters.two_point_attempted,
            ),
            ShotValue::Three => (
                &mut self.counters.three_point_made,
                &mut self.counters.three_point_attempted,
            ),
        }
    }
}

impl AsRef<StatCounters> for PlayerGameStat {
    fn as_ref(&self) -> &StatCounters {
        &self.counters
    }
}
