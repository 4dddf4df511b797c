use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-shot events that can be recorded for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counter {
    Steals,
    OffensiveRebounds,
    DefensiveRebounds,
    Assists,
    Blocks,
    Turnovers,
    Fouls,
}

impl Counter {
    pub const ALL: [Counter; 7] = [
        Counter::Steals,
        Counter::OffensiveRebounds,
        Counter::DefensiveRebounds,
        Counter::Assists,
        Counter::Blocks,
        Counter::Turnovers,
        Counter::Fouls,
    ];
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Counter::Steals => "steals",
            Counter::OffensiveRebounds => "offensive_rebounds",
            Counter::DefensiveRebounds => "defensive_rebounds",
            Counter::Assists => "assists",
            Counter::Blocks => "blocks",
            Counter::Turnovers => "turnovers",
            Counter::Fouls => "fouls",
        };
        f.write_str(name)
    }
}

/// The every-player counter set shared by live and stored stat lines.
///
/// Field names match the column names used by the game store, so this struct
/// is flattened directly into the stored player rows.
///
/// # Fields
///
/// * `two_point_made` / `two_point_attempted` - Two-point field goals.
/// * `three_point_made` / `three_point_attempted` - Three-point field goals.
/// * `steals`, `offensive_rebounds`, `defensive_rebounds`, `assists`, `blocks`,
///   `turnovers`, `fouls` - Plain event counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatCounters {
    pub two_point_made: u32,
    pub two_point_attempted: u32,
    pub three_point_made: u32,
    pub three_point_attempted: u32,
    pub steals: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
}

impl StatCounters {
    /// Points scored from made field goals.
    pub fn total_points(&self) -> u32 {
        self.two_point_made * 2 + self.three_point_made * 3
    }

    pub fn field_goals_made(&self) -> u32 {
        self.two_point_made + self.three_point_made
    }

    pub fn field_goals_attempted(&self) -> u32 {
        self.two_point_attempted + self.three_point_attempted
    }

    pub fn total_rebounds(&self) -> u32 {
        self.offensive_rebounds + self.defensive_rebounds
    }

    /// Whether anything at all was recorded on this line.
    pub fn has_activity(&self) -> bool {
        *self != StatCounters::default()
    }

    pub fn counter(&self, counter: Counter) -> u32 {
        match counter {
            Counter::Steals => self.steals,
            Counter::OffensiveRebounds => self.offensive_rebounds,
            Counter::DefensiveRebounds => self.defensive_rebounds,
            Counter::Assists => self.assists,
            Counter::Blocks => self.blocks,
            Counter::Turnovers => self.turnovers,
            Counter::Fouls => self.fouls,
        }
    }

    pub(crate) fn counter_mut(&mut self, counter: Counter) -> &mut u32 {
        match counter {
            Counter::Steals => &mut self.steals,
            Counter::OffensiveRebounds => &mut self.offensive_rebounds,
            Counter::DefensiveRebounds => &mut self.defensive_rebounds,
            Counter::Assists => &mut self.assists,
            Counter::Blocks => &mut self.blocks,
            Counter::Turnovers => &mut self.turnovers,
            Counter::Fouls => &mut self.fouls,
        }
    }

    /// Adds every counter of `other` into `self`.
    ///
    /// # Arguments
    ///
    /// * `other` - The counters to fold in.
    pub fn merge(&mut self, other: &StatCounters) {
        self.two_point_made += other.two_point_made;
        self.two_point_attempted += other.two_point_attempted;
        self.three_point_made += other.three_point_made;
        self.three_point_attempted += other.three_point_attempted;
        self.steals += other.steals;
        self.offensive_rebounds += other.offensive_rebounds;
        self.defensive_rebounds += other.defensive_rebounds;
        self.assists += other.assists;
        self.blocks += other.blocks;
        self.turnovers += other.turnovers;
        self.fouls += other.fouls;
    }
}

impl AsRef<StatCounters> for StatCounters {
    fn as_ref(&self) -> &StatCounters {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_points_counts_twos_and_threes() {
        let counters = StatCounters {
            two_point_made: 3,
            three_point_made: 2,
            ..Default::default()
        };
        assert_eq!(counters.total_points(), 12);
    }

    #[test]
    fn merge_adds_every_field() {
        let mut total = StatCounters {
            two_point_made: 1,
            two_point_attempted: 2,
            fouls: 4,
            ..Default::default()
        };
        let other = StatCounters {
            two_point_made: 2,
            two_point_attempted: 3,
            three_point_attempted: 1,
            assists: 5,
            fouls: 1,
            ..Default::default()
        };
        total.merge(&other);

        assert_eq!(total.two_point_made, 3);
        assert_eq!(total.two_point_attempted, 5);
        assert_eq!(total.three_point_attempted, 1);
        assert_eq!(total.assists, 5);
        assert_eq!(total.fouls, 5);
    }

    #[test]
    fn fresh_counters_have_no_activity() {
        let mut counters = StatCounters::default();
        assert!(!counters.has_activity());
        *counters.counter_mut(Counter::Blocks) += 1;
        assert!(counters.has_activity());
        assert_eq!(counters.counter(Counter::Blocks), 1);
    }

    #[test]
    fn missing_fields_deserialize_as_zero() {
        let counters: StatCounters =
            serde_json::from_str(r#"{"two_point_made": 2, "steals": 1}"#).unwrap();
        assert_eq!(counters.two_point_made, 2);
        assert_eq!(counters.steals, 1);
        assert_eq!(counters.fouls, 0);
    }
}
