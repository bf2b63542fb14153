use std::collections::BTreeSet;

use admission_control::{
    AdmissionConfig, AdmissionController, Event, RecordingNotifier, ScriptedSwings, Swing,
};
use proptest::prelude::*;

type Controller = AdmissionController<RecordingNotifier, ScriptedSwings>;

fn controller(capacity: usize, threshold: i64, script: Vec<Swing>) -> Controller {
    AdmissionController::with_parts(
        AdmissionConfig::new(capacity, threshold),
        RecordingNotifier::new(),
        ScriptedSwings::new(script),
    )
    .unwrap()
}

fn waiting(cu: &Controller) -> BTreeSet<String> {
    cu.queue().iter().map(|c| c.name().to_owned()).collect()
}

fn names(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| (*n).to_owned()).collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Documented scenarios
// =============================================================================

#[test]
fn capacity_two_walkthrough() {
    init_tracing();
    let mut cu = controller(2, 1000, vec![]);

    assert_eq!(cu.arrive("A", 30).as_deref(), Some("A"));
    assert_eq!(cu.arrive("B", 50).as_deref(), Some("B"));
    assert_eq!(cu.queue().peek_max().unwrap().name(), "B");

    assert_eq!(cu.arrive("C", 40), None);
    assert_eq!(waiting(&cu), names(&["A", "B"]));

    assert_eq!(cu.arrive("D", 60), None);
    assert_eq!(waiting(&cu), names(&["A", "B"]));

    assert_eq!(cu.see_next().as_deref(), Some("B"));
    assert_eq!(waiting(&cu), names(&["A"]));

    assert_eq!(
        cu.notifier().events(),
        &[
            ("D".to_owned(), Event::SentToBank),
            ("B".to_owned(), Event::SeeingManager),
        ]
    );
}

#[test]
fn low_threshold_forwards_directly() {
    let mut cu = controller(3, 10, vec![]);
    assert_eq!(cu.arrive("X", 50), None);
    assert!(cu.queue().is_empty());
    assert_eq!(cu.sent_to_bank(), 1);
}

#[test]
fn emergency_on_empty_queue() {
    let mut cu = controller(3, 10, vec![Swing::up(9)]);
    assert!(!cu.handle_emergency("ghost"));
}

#[test]
fn decrease_to_zero_walks_out() {
    let mut cu = controller(3, 100, vec![Swing::down(1)]);
    cu.arrive("a", 1);
    cu.arrive("b", 50);

    assert!(cu.handle_emergency("a"));
    assert!(!cu.queue().contains("a"));
    assert_eq!(cu.walked_out(), 1);
    assert_eq!(cu.sent_to_bank(), 0);
    assert!(cu.notifier().events().is_empty());

    assert!(!cu.handle_emergency("b"));
    assert_eq!(cu.queue().get("b").map(|c| c.priority()), Some(49));
}

#[test]
fn default_controller_logs_through_tracing() {
    init_tracing();
    let mut cu = AdmissionController::new(AdmissionConfig::new(2, 100)).unwrap();
    cu.arrive("a", 10);
    cu.arrive("b", 500);
    cu.handle_emergency("a");
    // Any swing leaves "a" between 9 and 10: below the threshold, above zero.
    let priority = cu.queue().get("a").map(|c| c.priority());
    assert!(matches!(priority, Some(9 | 10)), "priority = {priority:?}");
    assert_eq!(cu.see_next().as_deref(), Some("a"));
    assert_eq!(cu.processed(), 2);
    assert_eq!(cu.sent_to_bank(), 1);
}

#[test]
fn controller_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<AdmissionController>();
}

// =============================================================================
// Random sessions
// =============================================================================

#[derive(Debug, Clone)]
enum Action {
    Arrive(u8, i64),
    SeeNext,
    Emergency(u8),
    WalkOut(u8),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        5 => (0u8..12, -5i64..120).prop_map(|(n, p)| Action::Arrive(n, p)),
        2 => Just(Action::SeeNext),
        2 => (0u8..12).prop_map(Action::Emergency),
        1 => (0u8..12).prop_map(Action::WalkOut),
    ]
}

fn swing() -> impl Strategy<Value = Swing> {
    (any::<bool>(), 0u8..=Swing::MAX_PERCENT)
        .prop_map(|(down, pct)| if down { Swing::down(pct) } else { Swing::up(pct) })
}

proptest! {
    #[test]
    fn session_bookkeeping(
        capacity in 1usize..6,
        threshold in 0i64..100,
        script in prop::collection::vec(swing(), 1..8),
        actions in prop::collection::vec(action(), 0..120),
    ) {
        let mut cu = controller(capacity, threshold, script);
        let mut arrivals = 0u64;

        for action in actions {
            let before = waiting(&cu);
            match action {
                Action::Arrive(n, priority) => {
                    arrivals += 1;
                    let name = format!("c{n}");
                    let was_full = cu.queue().is_full();
                    let admitted = cu.arrive(&name, priority);

                    if let Some(admitted) = admitted {
                        prop_assert_eq!(&admitted, &name);
                        prop_assert!(priority <= threshold);
                        prop_assert!(!was_full);
                        prop_assert!(!before.contains(&name));
                    } else if priority > threshold {
                        prop_assert!(!cu.queue().contains(&name));
                    } else {
                        // Turned away or outbid; nothing else moved unless a
                        // resident shared the newcomer's name.
                        let after = waiting(&cu);
                        prop_assert!(after.is_subset(&before));
                    }
                }
                Action::SeeNext => {
                    let top = cu.queue().peek_max().map(|c| c.name().to_owned());
                    prop_assert_eq!(cu.see_next(), top);
                }
                Action::Emergency(n) => {
                    let name = format!("c{n}");
                    let present = before.contains(&name);
                    let left = cu.handle_emergency(&name);
                    prop_assert!(present || !left);
                    prop_assert_eq!(cu.queue().contains(&name), present && !left);
                    if let Some(c) = cu.queue().get(&name) {
                        prop_assert!(c.priority() > 0 && c.priority() <= threshold);
                    }
                }
                Action::WalkOut(n) => {
                    let name = format!("c{n}");
                    cu.walk_out(&name);
                    prop_assert!(!cu.queue().contains(&name));
                }
            }

            prop_assert!(cu.queue().len() <= capacity);
            prop_assert_eq!(cu.queue().index().len(), cu.queue().len());
            prop_assert_eq!(cu.processed(), arrivals);
            prop_assert_eq!(
                cu.notifier().events().len() as u64,
                cu.sent_to_bank() + cu.seen_by_manager()
            );
        }
    }
}
