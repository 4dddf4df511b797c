use crate::ledger::player_game_stat::TeamSide;

use serde::{Deserialize, Serialize};

/// Points per side. Both values stay non-negative by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    pub home: u32,
    pub away: u32,
}

impl TeamScore {
    pub fn get(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    pub(crate) fn add(&mut self, side: TeamSide, points: u32) {
        match side {
            TeamSide::Home => self.home += points,
            TeamSide::Away => self.away += points,
        }
    }

    /// Subtracts `points`, clamping at zero. Returns `false` if the score was already zero.
    pub(crate) fn subtract_clamped(&mut self, side: TeamSide, points: u32) -> bool {
        let score = match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        };
        if *score == 0 {
            return false;
        }
        *score = score.saturating_sub(points);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtract_never_goes_below_zero() {
        let mut score = TeamScore { home: 0, away: 2 };
        assert!(score.subtract_clamped(TeamSide::Away, 3));
        assert_eq!(score.away, 0);
        assert!(!score.subtract_clamped(TeamSide::Away, 1));
        assert!(!score.subtract_clamped(TeamSide::Home, 2));
        assert_eq!(score, TeamScore::default());
    }
}
