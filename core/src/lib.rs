#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Treasure Hunt engine.
//!
//! This crate defines the vocabulary that connects the codec, the world
//! model, the simulation system and the adapters. The world owns squares and
//! adventurers expressed with these types, the simulation advances a world
//! snapshot one turn at a time and reports what happened through [`Event`]
//! values, and adapters consume snapshots and events without mutating either.

use serde::{Deserialize, Serialize};

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell (the `x` axis).
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell (the `y` axis).
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the neighbouring cell one step towards `orientation`.
    ///
    /// Yields `None` when the step would leave the non-negative quadrant.
    /// Upper bounds are checked by the grid that owns the coordinate.
    #[must_use]
    pub fn step(self, orientation: Orientation) -> Option<Self> {
        match orientation {
            Orientation::North => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Orientation::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Orientation::South => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Orientation::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }
}

/// Compass direction an adventurer is facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Facing decreasing row indices.
    North,
    /// Facing increasing column indices.
    East,
    /// Facing increasing row indices.
    South,
    /// Facing decreasing column indices.
    West,
}

impl Orientation {
    /// Orientation reached after a quarter turn clockwise.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Orientation reached after a quarter turn counter-clockwise.
    #[must_use]
    pub const fn counter_clockwise(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::East => Self::North,
            Self::South => Self::East,
            Self::West => Self::South,
        }
    }

    /// Letter used for the orientation in map documents.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Resolves a map document letter into an orientation.
    ///
    /// `O` (ouest) is accepted as an alias for West.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' | 'O' => Some(Self::West),
            _ => None,
        }
    }
}

/// Scripted instruction executed by an adventurer during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Step one cell in the facing direction.
    Forward,
    /// Rotate a quarter turn counter-clockwise.
    TurnLeft,
    /// Rotate a quarter turn clockwise.
    TurnRight,
}

impl Move {
    /// Letter used for the instruction in map documents.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Forward => 'A',
            Self::TurnLeft => 'G',
            Self::TurnRight => 'D',
        }
    }

    /// Resolves a map document letter into a move instruction.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(Self::Forward),
            'G' => Some(Self::TurnLeft),
            'D' => Some(Self::TurnRight),
            _ => None,
        }
    }
}

/// Terrain stored at a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Open ground with nothing to collect.
    #[default]
    Empty,
    /// Impassable terrain.
    Mountain,
    /// Treasure pile holding the provided number of units.
    Treasure(u32),
}

impl Square {
    /// Reports whether adventurers may never enter the square.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Mountain)
    }

    /// Square left behind once a single treasure unit is dug up.
    ///
    /// Non-treasure squares are returned unchanged.
    #[must_use]
    pub const fn after_collection(self) -> Self {
        match self {
            Self::Treasure(amount) if amount > 1 => Self::Treasure(amount - 1),
            Self::Treasure(_) => Self::Empty,
            other => other,
        }
    }
}

/// Reasons a forward step may be rejected by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockReason {
    /// The target cell lies outside the grid.
    OutOfBounds,
    /// The target cell holds a mountain.
    Mountain,
    /// Another adventurer already stands on the target cell.
    Occupied,
}

/// Events reported by the simulation while resolving a tick.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that an adventurer stepped between two cells.
    AdventurerAdvanced {
        /// Position of the adventurer within the priority order.
        adventurer: usize,
        /// Cell occupied before the step.
        from: CellCoord,
        /// Cell occupied after the step.
        to: CellCoord,
    },
    /// Reports that a forward step was rejected.
    AdventurerBlocked {
        /// Position of the adventurer within the priority order.
        adventurer: usize,
        /// Cell the adventurer attempted to enter, if it lies on the grid.
        target: Option<CellCoord>,
        /// Specific reason the step failed.
        reason: BlockReason,
    },
    /// Confirms that an adventurer rotated in place.
    AdventurerTurned {
        /// Position of the adventurer within the priority order.
        adventurer: usize,
        /// Orientation after the rotation.
        orientation: Orientation,
    },
    /// Confirms that an adventurer dug up one treasure unit.
    TreasureCollected {
        /// Position of the adventurer within the priority order.
        adventurer: usize,
        /// Cell holding the treasure.
        cell: CellCoord,
        /// Units left on the square after collection.
        remaining: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::{BlockReason, CellCoord, Event, Move, Orientation, Square};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn four_clockwise_turns_restore_orientation() {
        let mut orientation = Orientation::North;
        let mut visited = Vec::new();
        for _ in 0..4 {
            orientation = orientation.clockwise();
            visited.push(orientation);
        }
        assert_eq!(
            visited,
            vec![
                Orientation::East,
                Orientation::South,
                Orientation::West,
                Orientation::North
            ]
        );
    }

    #[test]
    fn counter_clockwise_undoes_clockwise() {
        for orientation in [
            Orientation::North,
            Orientation::East,
            Orientation::South,
            Orientation::West,
        ] {
            assert_eq!(orientation.clockwise().counter_clockwise(), orientation);
        }
    }

    #[test]
    fn ouest_letter_aliases_west() {
        assert_eq!(Orientation::from_letter('O'), Some(Orientation::West));
        assert_eq!(Orientation::from_letter('W'), Some(Orientation::West));
        assert_eq!(Orientation::West.letter(), 'W');
        assert_eq!(Orientation::from_letter('X'), None);
    }

    #[test]
    fn move_letters_resolve() {
        assert_eq!(Move::from_letter('A'), Some(Move::Forward));
        assert_eq!(Move::from_letter('G'), Some(Move::TurnLeft));
        assert_eq!(Move::from_letter('D'), Some(Move::TurnRight));
        assert_eq!(Move::from_letter('a'), None);
        assert_eq!(Move::TurnLeft.letter(), 'G');
    }

    #[test]
    fn step_refuses_negative_coordinates() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(origin.step(Orientation::North), None);
        assert_eq!(origin.step(Orientation::West), None);
        assert_eq!(origin.step(Orientation::East), Some(CellCoord::new(1, 0)));
        assert_eq!(origin.step(Orientation::South), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn collection_depletes_treasure() {
        assert_eq!(Square::Treasure(3).after_collection(), Square::Treasure(2));
        assert_eq!(Square::Treasure(1).after_collection(), Square::Empty);
        assert_eq!(Square::Mountain.after_collection(), Square::Mountain);
        assert_eq!(Square::Empty.after_collection(), Square::Empty);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn blocked_event_round_trips_through_bincode() {
        assert_round_trip(&Event::AdventurerBlocked {
            adventurer: 2,
            target: None,
            reason: BlockReason::OutOfBounds,
        });
    }

    #[test]
    fn treasure_square_round_trips_through_bincode() {
        assert_round_trip(&Square::Treasure(7));
    }
}
