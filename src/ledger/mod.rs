//! Live per-game statistics with record/undo operations.

pub mod game_ledger;
pub mod ledger_error;
pub mod player_game_stat;
pub mod stat_counters;
pub mod team_score;

pub use game_ledger::{GameLedger, LedgerSnapshot};
pub use ledger_error::{LedgerError, UndoOutcome};
pub use player_game_stat::{PlayerGameStat, PlayerId, ShotValue, TeamSide};
pub use stat_counters::{Counter, StatCounters};
pub use team_score::TeamScore;
