//! Pure derivations over live snapshots and stored rows.

pub mod aggregator;
pub mod box_score;
pub mod career_summary;
pub mod history;
pub mod team_totals;

pub use aggregator::{
    career_aggregate, career_for_player, leaderboard, percentage, percentage_one_decimal,
    team_totals, total_points,
};
pub use box_score::{box_score, BoxScore, BoxScoreLine};
pub use career_summary::CareerSummary;
pub use history::{game_detail, group_games_by_date, GameDetail, GamesOnDate};
pub use team_totals::TeamTotals;
