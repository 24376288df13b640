use treasure_hunt_core::{CellCoord, Square};
use treasure_hunt_system_codec::{parse, EXAMPLE_MAP};
use treasure_hunt_system_simulation::{run_to_completion, Timeline};
use treasure_hunt_world::query;

#[test]
fn finish_matches_run_to_completion() {
    let map = parse(EXAMPLE_MAP).expect("example parses");
    let mut timeline = Timeline::new(map.clone());

    timeline.finish();

    assert_eq!(timeline.current(), &run_to_completion(map));
    assert_eq!(timeline.turn(), 9);
    assert!(!timeline.can_advance());
    assert!(!timeline.advance());
}

#[test]
fn stepping_back_restores_earlier_snapshots() {
    let map = parse(EXAMPLE_MAP).expect("example parses");
    let treasure_cell = CellCoord::new(1, 3);
    let mut timeline = Timeline::new(map);

    assert!(timeline.advance());
    assert!(timeline.advance());
    assert_eq!(
        timeline.current().square(treasure_cell),
        Some(Square::Treasure(2))
    );

    assert!(timeline.step_back());
    assert_eq!(timeline.turn(), 1);
    assert_eq!(
        timeline.current().square(treasure_cell),
        Some(Square::Treasure(3))
    );
    assert_eq!(
        timeline.current().adventurers()[0].cell(),
        CellCoord::new(1, 2)
    );
}

#[test]
fn reset_returns_to_the_initial_map() {
    let map = parse(EXAMPLE_MAP).expect("example parses");
    let mut timeline = Timeline::new(map.clone());

    timeline.finish();
    assert_eq!(query::collected_treasure(timeline.current()), 3);

    timeline.reset();
    assert_eq!(timeline.turn(), 0);
    assert_eq!(timeline.current(), &map);
    assert_eq!(timeline.snapshots().count(), 1);
}

#[test]
fn replaying_after_seek_is_deterministic() {
    let map = parse(EXAMPLE_MAP).expect("example parses");
    let mut timeline = Timeline::new(map);

    timeline.finish();
    let finished = timeline.current().clone();

    assert_eq!(timeline.seek(4), 4);
    let midway = timeline.current().clone();
    assert_eq!(query::collected_treasure(&midway), 2);

    timeline.finish();
    assert_eq!(timeline.current(), &finished);
    assert_eq!(timeline.snapshots().nth(4), Some(&midway));
}
