use crate::ledger::{Counter, PlayerId, ShotValue};

use serde::{Deserialize, Serialize};

/// One operator action during live play.
///
/// Serialized with a `type` tag, e.g. `{"type": "shot", "player": 0, "value": 3, "made": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Shot {
        player: PlayerId,
        value: ShotValue,
        made: bool,
    },
    UndoShot {
        player: PlayerId,
        value: ShotValue,
        was_made: bool,
    },
    Stat {
        player: PlayerId,
        counter: Counter,
    },
    UndoStat {
        player: PlayerId,
        counter: Counter,
    },
    AwayPoints {
        points: u32,
    },
    UndoAwayPoints {
        points: u32,
    },
    Substitute {
        out: PlayerId,
        name: String,
    },
}
