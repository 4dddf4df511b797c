//! Property tests for the ledger invariants under arbitrary operation sequences.

use proptest::prelude::*;
use scorekeeper::aggregation::{percentage, percentage_one_decimal};
use scorekeeper::ledger::{Counter, GameLedger, PlayerId, ShotValue};

const ROSTER: [&str; 3] = ["Alice", "Bob", "Carol"];

#[derive(Debug, Clone)]
enum Op {
    Shot(u32, ShotValue, bool),
    UndoShot(u32, ShotValue, bool),
    Stat(u32, Counter),
    UndoStat(u32, Counter),
    Away(u32),
    UndoAway(u32),
}

fn shot_value() -> impl Strategy<Value = ShotValue> {
    prop_oneof![Just(ShotValue::Two), Just(ShotValue::Three)]
}

fn counter() -> impl Strategy<Value = Counter> {
    prop::sample::select(Counter::ALL.to_vec())
}

fn op() -> impl Strategy<Value = Op> {
    let player = 0..ROSTER.len() as u32;
    prop_oneof![
        (player.clone(), shot_value(), any::<bool>()).prop_map(|(p, v, m)| Op::Shot(p, v, m)),
        (player.clone(), shot_value(), any::<bool>()).prop_map(|(p, v, m)| Op::UndoShot(p, v, m)),
        (player.clone(), counter()).prop_map(|(p, c)| Op::Stat(p, c)),
        (player, counter()).prop_map(|(p, c)| Op::UndoStat(p, c)),
        (1u32..=3).prop_map(Op::Away),
        (1u32..=3).prop_map(Op::UndoAway),
    ]
}

fn apply(ledger: &mut GameLedger, op: &Op) {
    match *op {
        Op::Shot(p, v, m) => ledger.record_shot(PlayerId(p), v, m).unwrap(),
        Op::UndoShot(p, v, m) => {
            ledger.undo_shot(PlayerId(p), v, m).unwrap();
        }
        Op::Stat(p, c) => ledger.record_counter_event(PlayerId(p), c).unwrap(),
        Op::UndoStat(p, c) => {
            ledger.undo_counter_event(PlayerId(p), c).unwrap();
        }
        Op::Away(points) => ledger.record_away_team_points(points),
        Op::UndoAway(points) => {
            ledger.undo_away_team_points(points);
        }
    }
}

proptest! {
    #[test]
    fn made_never_exceeds_attempted(ops in prop::collection::vec(op(), 0..200)) {
        let mut ledger = GameLedger::new(ROSTER);
        for op in &ops {
            apply(&mut ledger, op);
            for stat in ledger.players() {
                prop_assert!(stat.counters.two_point_made <= stat.counters.two_point_attempted);
                prop_assert!(stat.counters.three_point_made <= stat.counters.three_point_attempted);
            }
        }
    }

    #[test]
    fn home_score_matches_player_points(ops in prop::collection::vec(op(), 0..200)) {
        let mut ledger = GameLedger::new(ROSTER);
        for op in &ops {
            apply(&mut ledger, op);
            let sum: u32 = ledger.players().map(|stat| stat.total_points()).sum();
            prop_assert_eq!(ledger.score().home, sum);
        }
    }

    #[test]
    fn record_then_undo_restores_ledger(
        ops in prop::collection::vec(op(), 0..100),
        player in 0..ROSTER.len() as u32,
        counter in counter(),
        value in shot_value(),
        made in any::<bool>(),
    ) {
        let mut ledger = GameLedger::new(ROSTER);
        for op in &ops {
            apply(&mut ledger, op);
        }
        let before = ledger.clone();

        ledger.record_counter_event(PlayerId(player), counter).unwrap();
        prop_assert!(ledger.undo_counter_event(PlayerId(player), counter).unwrap().is_applied());
        prop_assert_eq!(&ledger, &before);

        ledger.record_shot(PlayerId(player), value, made).unwrap();
        prop_assert!(ledger.undo_shot(PlayerId(player), value, made).unwrap().is_applied());
        prop_assert_eq!(&ledger, &before);
    }

    #[test]
    fn percentages_stay_in_range(made in 0u32..500, extra in 0u32..500) {
        let attempted = made + extra;
        prop_assert!(percentage(made, attempted) <= 100);
        let one_decimal = percentage_one_decimal(made, attempted);
        prop_assert!((0.0..=100.0).contains(&one_decimal));
    }
}
