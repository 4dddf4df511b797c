//! Game lifecycle: setup, live tracking with substitutions, save or discard.

pub mod game_event;
pub mod game_phase;
pub mod game_script;
pub mod game_setup;
pub mod session_error;

pub use game_event::GameEvent;
pub use game_phase::{FinishedGame, GamePhase, LiveGame, Session};
pub use game_script::{GameScript, ScriptDefaults};
pub use game_setup::{GameInfo, GameSetup};
pub use session_error::SessionError;
