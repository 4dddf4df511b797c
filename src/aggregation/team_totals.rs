use crate::aggregation::aggregator::percentage_one_decimal;
use crate::ledger::StatCounters;

use serde::Serialize;

/// Summed counters for a team in one game.
///
/// # Fields
///
/// * `counters` - Element-wise sum of every player's counters.
/// * `total_field_goal_made` / `total_field_goal_attempted` - Two- and three-point shots combined.
/// * `total_rebounds` - Offensive plus defensive rebounds.
/// * `total_points` - Points from made field goals.
/// * `field_goal_percentage`, `two_point_percentage`, `three_point_percentage` -
///   Shooting percentages rounded to one decimal.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TeamTotals {
    #[serde(flatten)]
    pub counters: StatCounters,
    pub total_field_goal_made: u32,
    pub total_field_goal_attempted: u32,
    pub total_rebounds: u32,
    pub total_points: u32,
    pub field_goal_percentage: f64,
    pub two_point_percentage: f64,
    pub three_point_percentage: f64,
}

impl TeamTotals {
    pub(crate) fn from_counters(counters: StatCounters) -> Self {
        let total_field_goal_made = counters.field_goals_made();
        let total_field_goal_attempted = counters.field_goals_attempted();
        Self {
            total_field_goal_made,
            total_field_goal_attempted,
            total_rebounds: counters.total_rebounds(),
            total_points: counters.total_points(),
            field_goal_percentage: percentage_one_decimal(
                total_field_goal_made,
                total_field_goal_attempted,
            ),
            two_point_percentage: percentage_one_decimal(
                counters.two_point_made,
                counters.two_point_attempted,
            ),
            three_point_percentage: percentage_one_decimal(
                counters.three_point_made,
                counters.three_point_attempted,
            ),
            counters,
        }
    }
}
