use crate::ledger::{LedgerError, PlayerId};
use crate::storage::StorageError;

use thiserror::Error;

/// Errors raised while driving a game session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Operation needs a {expected} game, but the game is {found}")]
    WrongPhase {
        expected: &'static str,
        found: &'static str,
    },

    #[error("The home team needs at least one player")]
    EmptyRoster,

    #[error("Player name must not be blank")]
    BlankPlayerName,

    #[error("{0} is not on the court")]
    NotOnCourt(PlayerId),

    #[error("{0} is already on the court")]
    AlreadyOnCourt(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
