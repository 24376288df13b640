#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic turn-by-turn simulation of adventurers exploring a map.
//!
//! Every function in this crate is pure with respect to its input: a tick
//! reads a [`TreasureMap`] snapshot and returns a new one, leaving the caller's
//! copy untouched so earlier turns can be kept around for replay.

mod timeline;

pub use timeline::Timeline;

use tracing::{debug, trace};
use treasure_hunt_core::{BlockReason, CellCoord, Event, Move, Square};
use treasure_hunt_world::{Adventurer, TreasureMap};

/// Advances the map by a single turn.
#[must_use]
pub fn tick(map: &TreasureMap) -> TreasureMap {
    let mut events = Vec::new();
    tick_with_events(map, &mut events)
}

/// Advances the map by a single turn, reporting what happened.
///
/// Adventurers act in list order. Each one sees the positions already
/// resolved for adventurers ahead of it and the starting positions of those
/// behind it, so the earlier adventurer wins any contested cell. Treasure is
/// collected once every adventurer has acted, and only by adventurers whose
/// forward step succeeded during this turn.
#[must_use]
pub fn tick_with_events(map: &TreasureMap, out_events: &mut Vec<Event>) -> TreasureMap {
    let mut next = map.clone();
    resolve_movement(&mut next, out_events);
    collect_treasures(&mut next, out_events);
    debug!(
        adventurers = next.adventurers().len(),
        events = out_events.len(),
        "tick resolved"
    );
    next
}

/// Reports whether any adventurer still has instructions left to execute.
#[must_use]
pub fn can_still_move(adventurers: &[Adventurer]) -> bool {
    adventurers.iter().any(Adventurer::has_pending_moves)
}

/// Ticks the map until every adventurer has exhausted its script.
#[must_use]
pub fn run_to_completion(mut map: TreasureMap) -> TreasureMap {
    let mut turns = 0_usize;
    while can_still_move(map.adventurers()) {
        map = tick(&map);
        turns += 1;
    }
    debug!(turns, "simulation finished");
    map
}

fn resolve_movement(map: &mut TreasureMap, out_events: &mut Vec<Event>) {
    for index in 0..map.adventurers().len() {
        let Some(instruction) = map.adventurers_mut()[index].pop_move() else {
            map.adventurers_mut()[index].hold();
            continue;
        };

        match instruction {
            Move::TurnLeft | Move::TurnRight => {
                let adventurer = &mut map.adventurers_mut()[index];
                let orientation = if instruction == Move::TurnLeft {
                    adventurer.orientation().counter_clockwise()
                } else {
                    adventurer.orientation().clockwise()
                };
                adventurer.face(orientation);
                trace!(adventurer = index, ?orientation, "adventurer turned");
                out_events.push(Event::AdventurerTurned {
                    adventurer: index,
                    orientation,
                });
            }
            Move::Forward => step_forward(map, index, out_events),
        }
    }
}

fn step_forward(map: &mut TreasureMap, index: usize, out_events: &mut Vec<Event>) {
    let adventurer = &map.adventurers()[index];
    let from = adventurer.cell();
    let target = from
        .step(adventurer.orientation())
        .filter(|cell| map.contains(*cell));

    let verdict = match target {
        None => Err(BlockReason::OutOfBounds),
        Some(cell) => match check_target(map, index, cell) {
            Some(reason) => Err(reason),
            None => Ok(cell),
        },
    };

    let adventurer = &mut map.adventurers_mut()[index];
    match verdict {
        Ok(to) => {
            adventurer.advance(to);
            trace!(adventurer = index, ?from, ?to, "adventurer advanced");
            out_events.push(Event::AdventurerAdvanced {
                adventurer: index,
                from,
                to,
            });
        }
        Err(reason) => {
            adventurer.hold();
            trace!(adventurer = index, ?target, ?reason, "adventurer blocked");
            out_events.push(Event::AdventurerBlocked {
                adventurer: index,
                target,
                reason,
            });
        }
    }
}

fn check_target(map: &TreasureMap, index: usize, cell: CellCoord) -> Option<BlockReason> {
    if map.square(cell).is_some_and(|square| square.is_blocking()) {
        return Some(BlockReason::Mountain);
    }

    let occupied = map
        .adventurers()
        .iter()
        .enumerate()
        .any(|(other, adventurer)| other != index && adventurer.cell() == cell);
    occupied.then_some(BlockReason::Occupied)
}

fn collect_treasures(map: &mut TreasureMap, out_events: &mut Vec<Event>) {
    for index in 0..map.adventurers().len() {
        let adventurer = &map.adventurers()[index];
        if !adventurer.just_moved() {
            continue;
        }

        let cell = adventurer.cell();
        let Some(square @ Square::Treasure(_)) = map.square(cell) else {
            continue;
        };

        let remaining = square.after_collection();
        let _ = map.set_square(cell, remaining);
        map.adventurers_mut()[index].record_collection();

        let remaining = match remaining {
            Square::Treasure(amount) => amount,
            Square::Empty | Square::Mountain => 0,
        };
        trace!(adventurer = index, ?cell, remaining, "treasure collected");
        out_events.push(Event::TreasureCollected {
            adventurer: index,
            cell,
            remaining,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treasure_hunt_core::Orientation;

    fn map_with(adventurers: Vec<Adventurer>, width: u32, height: u32) -> TreasureMap {
        let mut map = TreasureMap::new(width, height).expect("map fits");
        for adventurer in adventurers {
            assert!(map.push_adventurer(adventurer));
        }
        map
    }

    #[test]
    fn idle_adventurer_sheds_just_moved() {
        let mut map = map_with(
            vec![Adventurer::new(
                "Ceres",
                CellCoord::new(0, 0),
                Orientation::East,
                [Move::Forward],
            )],
            2,
            1,
        );
        map = tick(&map);
        assert!(map.adventurers()[0].just_moved());

        map = tick(&map);
        assert!(!map.adventurers()[0].just_moved());
        assert_eq!(map.adventurers()[0].cell(), CellCoord::new(1, 0));
    }

    #[test]
    fn occupancy_ignores_the_moving_adventurer_itself() {
        let map = map_with(
            vec![Adventurer::new(
                "Vesta",
                CellCoord::new(0, 0),
                Orientation::South,
                [Move::Forward],
            )],
            1,
            2,
        );
        assert_eq!(check_target(&map, 0, CellCoord::new(0, 0)), None);
    }

    #[test]
    fn events_follow_priority_order() {
        let map = map_with(
            vec![
                Adventurer::new("A", CellCoord::new(0, 0), Orientation::East, [Move::TurnRight]),
                Adventurer::new("B", CellCoord::new(2, 0), Orientation::West, [Move::Forward]),
            ],
            3,
            1,
        );
        let mut events = Vec::new();
        let _ = tick_with_events(&map, &mut events);

        assert_eq!(
            events,
            vec![
                Event::AdventurerTurned {
                    adventurer: 0,
                    orientation: Orientation::South,
                },
                Event::AdventurerAdvanced {
                    adventurer: 1,
                    from: CellCoord::new(2, 0),
                    to: CellCoord::new(1, 0),
                },
            ]
        );
    }
}
