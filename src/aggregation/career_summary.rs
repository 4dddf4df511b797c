use crate::aggregation::aggregator::{percentage, round_one_decimal};
use crate::ledger::StatCounters;

use serde::Serialize;

/// Career line for one player across every stored game.
///
/// # Fields
///
/// * `player_name` - The name the rows were grouped by.
/// * `games` - Number of stored rows folded in.
/// * `total_points` - Sum of the stored per-game totals.
/// * `counters` - Sum of every counter.
/// * `average_points` - `total_points / games`, `0.0` when `games` is zero.
/// * `turnovers_per_game` - `turnovers / games`, rounded to one decimal.
/// * `field_goal_percentage`, `two_point_percentage`, `three_point_percentage` -
///   Whole-number shooting percentages.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CareerSummary {
    pub player_name: String,
    pub games: u32,
    pub total_points: u32,
    #[serde(flatten)]
    pub counters: StatCounters,
    pub average_points: f64,
    pub turnovers_per_game: f64,
    pub field_goal_percentage: u32,
    pub two_point_percentage: u32,
    pub three_point_percentage: u32,
}

impl CareerSummary {
    pub(crate) fn new(
        player_name: String,
        games: u32,
        total_points: u32,
        counters: StatCounters,
    ) -> Self {
        Self {
            player_name,
            games,
            total_points,
            average_points: per_game(total_points, games),
            turnovers_per_game: round_one_decimal(per_game(counters.turnovers, games)),
            field_goal_percentage: percentage(
                counters.field_goals_made(),
                counters.field_goals_attempted(),
            ),
            two_point_percentage: percentage(counters.two_point_made, counters.two_point_attempted),
            three_point_percentage: percentage(
                counters.three_point_made,
                counters.three_point_attempted,
            ),
            counters,
        }
    }

    /// Average points rounded to one decimal, as shown on the leaderboard.
    pub fn average_points_display(&self) -> f64 {
        round_one_decimal(self.average_points)
    }
}

fn per_game(total: u32, games: u32) -> f64 {
    if games == 0 {
        return 0.0;
    }
    total as f64 / games as f64
}
