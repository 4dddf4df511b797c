use crate::aggregation::career_summary::CareerSummary;
use crate::aggregation::team_totals::TeamTotals;
use crate::ledger::StatCounters;
use crate::storage::HistoricalPlayerStat;

use std::collections::HashMap;

/// Shooting percentage rounded to a whole number.
///
/// # Arguments
///
/// * `made` - Made shots.
/// * `attempted` - Attempted shots.
///
/// # Returns
///
/// A value in `0..=100`, or `0` when nothing was attempted.
pub fn percentage(made: u32, attempted: u32) -> u32 {
    if attempted == 0 {
        return 0;
    }
    (made as f64 / attempted as f64 * 100.0).round() as u32
}

/// Shooting percentage rounded to one decimal place, `0.0` when nothing was attempted.
pub fn percentage_one_decimal(made: u32, attempted: u32) -> f64 {
    if attempted == 0 {
        return 0.0;
    }
    round_one_decimal(made as f64 / attempted as f64 * 100.0)
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn total_points(counters: &StatCounters) -> u32 {
    counters.total_points()
}

/// Sums every counter over a set of stat lines.
///
/// Accepts live ledger lines and stored player rows alike.
///
/// # Arguments
///
/// * `lines` - The stat lines to fold. An empty input yields all-zero totals.
///
/// # Returns
///
/// A `TeamTotals` with the summed counters and the derived field goal,
/// rebound and percentage figures.
pub fn team_totals<'a, I, T>(lines: I) -> TeamTotals
where
    I: IntoIterator<Item = &'a T>,
    T: AsRef<StatCounters> + 'a,
{
    let mut counters = StatCounters::default();
    for line in lines {
        counters.merge(line.as_ref());
    }
    TeamTotals::from_counters(counters)
}

/// Folds stored player rows into one career line per player name.
///
/// Players appear in the order their name first shows up in `records`.
///
/// # Arguments
///
/// * `records` - Stored player rows from any number of games.
///
/// # Returns
///
/// A `Vec<CareerSummary>`, one per distinct player name.
pub fn career_aggregate(records: &[HistoricalPlayerStat]) -> Vec<CareerSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut careers: Vec<CareerTotals> = Vec::new();

    for record in records {
        let position = *index.entry(record.player_name.as_str()).or_insert_with(|| {
            careers.push(CareerTotals {
                player_name: record.player_name.clone(),
                games: 0,
                total_points: 0,
                counters: StatCounters::default(),
            });
            careers.len() - 1
        });

        if let Some(career) = careers.get_mut(position) {
            career.games += 1;
            career.total_points += record.total_points;
            career.counters.merge(&record.counters);
        }
    }

    careers
        .into_iter()
        .map(|career| {
            CareerSummary::new(
                career.player_name,
                career.games,
                career.total_points,
                career.counters,
            )
        })
        .collect()
}

/// Career line for a single player name; all zeros if the name never played.
pub fn career_for_player(player_name: &str, records: &[HistoricalPlayerStat]) -> CareerSummary {
    let matching: Vec<HistoricalPlayerStat> = records
        .iter()
        .filter(|record| record.player_name == player_name)
        .cloned()
        .collect();

    career_aggregate(&matching)
        .into_iter()
        .next()
        .unwrap_or_else(|| CareerSummary::new(player_name.to_string(), 0, 0, StatCounters::default()))
}

/// Sorts career lines by total points, highest first. Ties keep their input order.
pub fn leaderboard(mut careers: Vec<CareerSummary>) -> Vec<CareerSummary> {
    careers.sort_by(|c1, c2| c2.total_points.cmp(&c1.total_points));
    careers
}

struct CareerTotals {
    player_name: String,
    games: u32,
    total_points: u32,
    counters: StatCounters,
}
