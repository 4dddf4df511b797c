use crate::aggregation::aggregator::team_totals;
use crate::aggregation::team_totals::TeamTotals;
use crate::storage::{HistoricalGameRecord, HistoricalPlayerStat, StoredGame};

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// Games played on one calendar day.
///
/// # Fields
///
/// * `date` - The day.
/// * `wins` - Games where the home side outscored the away side.
/// * `losses` - Games where the away side outscored the home side. Ties count
///   as neither.
/// * `games` - The games of that day.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GamesOnDate {
    pub date: NaiveDate,
    pub wins: u32,
    pub losses: u32,
    pub games: Vec<HistoricalGameRecord>,
}

impl GamesOnDate {
    fn new(game: HistoricalGameRecord) -> Self {
        let mut group = Self {
            date: game.date,
            wins: 0,
            losses: 0,
            games: Vec::new(),
        };
        group.push(game);
        group
    }

    fn push(&mut self, game: HistoricalGameRecord) {
        match game.team_a_score.cmp(&game.team_b_score) {
            Ordering::Greater => self.wins += 1,
            Ordering::Less => self.losses += 1,
            Ordering::Equal => {}
        }
        self.games.push(game);
    }
}

/// A stored game ready for the detail view.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GameDetail {
    pub game: HistoricalGameRecord,
    pub players: Vec<HistoricalPlayerStat>,
    pub totals: TeamTotals,
}

/// Groups games by their date, newest date first.
///
/// Games sharing a date keep the order they were given in.
pub fn group_games_by_date(games: &[HistoricalGameRecord]) -> Vec<GamesOnDate> {
    let mut sorted = games.to_vec();
    sorted.sort_by(|g1, g2| g2.date.cmp(&g1.date));

    let mut groups: Vec<GamesOnDate> = Vec::new();
    for game in sorted {
        let same_day = matches!(groups.last(), Some(group) if group.date == game.date);
        if same_day {
            if let Some(group) = groups.last_mut() {
                group.push(game);
            }
        } else {
            groups.push(GamesOnDate::new(game));
        }
    }
    groups
}

pub fn game_detail(stored: StoredGame) -> GameDetail {
    let totals = team_totals(&stored.players);
    GameDetail {
        game: stored.game,
        players: stored.players,
        totals,
    }
}
