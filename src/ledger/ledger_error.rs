use crate::ledger::player_game_stat::PlayerId;

use thiserror::Error;

/// Errors surfaced by ledger operations.
///
/// Undo calls at a counter's floor are not errors; they report
/// [`UndoOutcome::ClampedNoOp`] instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Invalid shot value: {0} (expected 2 or 3)")]
    InvalidShotValue(u8),
}

/// What an undo operation actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    Applied,
    /// The counter or score was already at its floor; nothing changed.
    ClampedNoOp,
}

impl UndoOutcome {
    pub fn is_applied(self) -> bool {
        self == UndoOutcome::Applied
    }
}
