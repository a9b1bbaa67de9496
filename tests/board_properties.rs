use chrono::NaiveDate;
use mostle_backend::board::{AssignmentBoard, ScoreState};
use mostle_backend::domain::{Assignment, DropTarget, MetricKey};
use mostle_backend::seeds::tech_giants;
use proptest::prelude::*;

const IDS: [&str; 5] = ["apple", "microsoft", "google", "amazon", "meta"];

// --- STRATEGIES ---

fn arb_target() -> impl Strategy<Value = DropTarget> {
    prop_oneof![
        Just(DropTarget::Pool),
        (0usize..5).prop_map(|i| DropTarget::Slot(MetricKey::ALL[i])),
    ]
}

fn arb_drops() -> impl Strategy<Value = Vec<(usize, DropTarget)>> {
    prop::collection::vec((0usize..5, arb_target()), 0..40)
}

fn assignment_from(drops: &[(usize, DropTarget)]) -> Assignment {
    let mut a = Assignment::empty();
    for (i, t) in drops {
        a.apply_drop(IDS[*i], *t);
    }
    a
}

fn ready_board() -> AssignmentBoard {
    let mut b = AssignmentBoard::new();
    let t = b.begin_load();
    b.finish_load(t, Ok(tech_giants(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())));
    b
}

fn occupied(a: &Assignment) -> Vec<&str> {
    a.iter().filter_map(|(_, v)| v).collect()
}

proptest! {
    #[test]
    fn no_object_ever_occupies_two_slots(drops in arb_drops()) {
        let mut a = Assignment::empty();
        for (i, t) in drops {
            a.apply_drop(IDS[i], t);
            let mut ids = occupied(&a);
            let before = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), before);
        }
    }

    #[test]
    fn pool_drop_only_clears_own_slot(drops in arb_drops(), i in 0usize..5) {
        let mut a = assignment_from(&drops);
        let before = a.clone();
        let from = a.slot_of(IDS[i]);
        a.apply_drop(IDS[i], DropTarget::Pool);

        prop_assert!(!a.is_assigned(IDS[i]));
        for key in MetricKey::ALL {
            if Some(key) != from {
                prop_assert_eq!(a.get(key), before.get(key));
            }
        }
    }

    #[test]
    fn pool_object_onto_slot_evicts_occupant(drops in arb_drops(), i in 0usize..5, s in 0usize..5) {
        let mut a = assignment_from(&drops);
        a.apply_drop(IDS[i], DropTarget::Pool);
        let before = a.clone();
        let slot = MetricKey::ALL[s];
        let occupant = before.get(slot).map(str::to_string);

        a.apply_drop(IDS[i], DropTarget::Slot(slot));

        prop_assert_eq!(a.get(slot), Some(IDS[i]));
        if let Some(b) = occupant {
            prop_assert!(!a.is_assigned(&b));
        }
        for key in MetricKey::ALL.into_iter().filter(|k| *k != slot) {
            prop_assert_eq!(a.get(key), before.get(key));
        }
    }

    #[test]
    fn slot_to_slot_swaps(drops in arb_drops(), i in 0usize..5, x in 0usize..5, y in 0usize..5) {
        prop_assume!(x != y);
        let (x, y) = (MetricKey::ALL[x], MetricKey::ALL[y]);
        let mut a = assignment_from(&drops);
        a.apply_drop(IDS[i], DropTarget::Slot(x));
        let before = a.clone();
        let occupant = before.get(y).map(str::to_string);

        a.apply_drop(IDS[i], DropTarget::Slot(y));

        prop_assert_eq!(a.get(y), Some(IDS[i]));
        prop_assert_eq!(a.get(x), occupant.as_deref());
        for key in MetricKey::ALL.into_iter().filter(|k| *k != x && *k != y) {
            prop_assert_eq!(a.get(key), before.get(key));
        }
    }

    #[test]
    fn reset_always_empties(drops in arb_drops()) {
        let mut b = ready_board();
        for (i, t) in drops {
            b.drop_object(IDS[i], t);
        }
        b.reset();
        let r = b.ready().unwrap();
        prop_assert!(r.assignment.is_empty());
        prop_assert_eq!(&r.score, &ScoreState::Idle);
        prop_assert_eq!(b.pool_objects().len(), 5);
    }
}
