use crate::aggregation::aggregator::{percentage, team_totals};
use crate::aggregation::team_totals::TeamTotals;
use crate::ledger::{LedgerSnapshot, PlayerGameStat, PlayerId, StatCounters, TeamScore};

use serde::Serialize;

/// One player's row in the live box score.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BoxScoreLine {
    pub player_id: PlayerId,
    pub name: String,
    pub on_court: bool,
    pub total_points: u32,
    pub field_goal_percentage: u32,
    pub two_point_percentage: u32,
    pub three_point_percentage: u32,
    #[serde(flatten)]
    pub counters: StatCounters,
}

/// Box score for the game in progress: score, player rows and team totals.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BoxScore {
    pub score: TeamScore,
    pub players: Vec<BoxScoreLine>,
    pub totals: TeamTotals,
}

/// Builds the box score from a ledger snapshot.
///
/// Every player who was ever rostered is listed, including those currently
/// on the bench, ordered by total points with ties kept in roster order.
///
/// # Arguments
///
/// * `snapshot` - The ledger state to render.
/// * `on_court` - Ids of the players currently on the court.
pub fn box_score(snapshot: &LedgerSnapshot, on_court: &[PlayerId]) -> BoxScore {
    let mut players: Vec<BoxScoreLine> = snapshot
        .players
        .iter()
        .map(|stat| box_score_line(stat, on_court.contains(&stat.player_id)))
        .collect();
    players.sort_by(|p1, p2| p2.total_points.cmp(&p1.total_points));

    BoxScore {
        score: snapshot.score,
        players,
        totals: team_totals(&snapshot.players),
    }
}

fn box_score_line(stat: &PlayerGameStat, on_court: bool) -> BoxScoreLine {
    let counters = stat.counters;
    BoxScoreLine {
        player_id: stat.player_id,
        name: stat.name.clone(),
        on_court,
        total_points: counters.total_points(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Counter, GameLedger, ShotValue};

    #[test]
    fn rows_sorted_by_points_with_bench_flag() {
        let mut ledger = GameLedger::new(["Alice", "Bob", "Carol"]);
        ledger.record_shot(PlayerId(1), ShotValue::Three, true).unwrap();
        ledger.record_shot(PlayerId(1), ShotValue::Two, false).unwrap();
        ledger.record_shot(PlayerId(2), ShotValue::Two, true).unwrap();
        ledger.record_counter_event(PlayerId(0), Counter::Assists).unwrap();

        let report = box_score(&ledger.snapshot(), &[PlayerId(0), PlayerId(1)]);

        let order: Vec<_> = report.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(order, ["Bob", "Carol", "Alice"]);
        assert!(report.players[0].on_court);
        assert!(!report.players[1].on_court);
        assert_eq!(report.players[0].field_goal_percentage, 50);
        assert_eq!(report.players[0].three_point_percentage, 100);
        assert_eq!(report.score.home, 5);
        assert_eq!(report.totals.total_points, 5);
        assert_eq!(report.totals.counters.assists, 1);
    }
}
