#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative map state for Treasure Hunt.
//!
//! A [`TreasureMap`] owns a fixed-size square grid and the ordered list of
//! adventurers exploring it. Maps are plain values: cloning one produces an
//! independent snapshot, which is how the simulation keeps prior turns intact
//! while it builds the next one.

mod grid;

use std::collections::VecDeque;

use serde::Serialize;
use thiserror::Error;
use treasure_hunt_core::{CellCoord, Move, Orientation, Square};

use crate::grid::SquareGrid;

/// Largest number of cells a map may hold.
pub const MAX_CELLS: u64 = 1 << 24;

/// Failure raised when a map's dimensions cannot be stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("a {columns}x{rows} map exceeds the limit of {limit} cells", limit = MAX_CELLS)]
pub struct GridTooLarge {
    columns: u32,
    rows: u32,
}

impl GridTooLarge {
    /// Requested `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }
}

/// Grid of squares plus the adventurers exploring it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TreasureMap {
    squares: SquareGrid,
    adventurers: Vec<Adventurer>,
}

impl TreasureMap {
    /// Creates a map of the provided dimensions with every square empty.
    ///
    /// Fails when `width * height` exceeds [`MAX_CELLS`].
    pub fn new(width: u32, height: u32) -> Result<Self, GridTooLarge> {
        Ok(Self {
            squares: SquareGrid::new(width, height)?,
            adventurers: Vec::new(),
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.squares.dimensions().0
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.squares.dimensions().1
    }

    /// Reports whether `cell` lies on the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.squares.index(cell).is_some()
    }

    /// Square stored at `cell`, or `None` when the cell lies off the grid.
    #[must_use]
    pub fn square(&self, cell: CellCoord) -> Option<Square> {
        self.squares.get(cell)
    }

    /// Overwrites the square at `cell`.
    ///
    /// Returns `false` and leaves the map untouched when `cell` lies off the grid.
    pub fn set_square(&mut self, cell: CellCoord, square: Square) -> bool {
        self.squares.set(cell, square)
    }

    /// Iterates every square in row-major order (y ascending, then x ascending).
    pub fn squares(&self) -> impl Iterator<Item = (CellCoord, Square)> + '_ {
        self.squares.iter()
    }

    /// Adventurers in priority order.
    #[must_use]
    pub fn adventurers(&self) -> &[Adventurer] {
        &self.adventurers
    }

    /// Mutable access to the adventurers in priority order.
    ///
    /// Callers are responsible for keeping every adventurer on the grid and on
    /// a distinct cell.
    pub fn adventurers_mut(&mut self) -> &mut [Adventurer] {
        &mut self.adventurers
    }

    /// Appends an adventurer at the lowest priority.
    ///
    /// Returns `false` and drops the adventurer when it stands off the grid.
    pub fn push_adventurer(&mut self, adventurer: Adventurer) -> bool {
        if !self.contains(adventurer.cell) {
            return false;
        }
        self.adventurers.push(adventurer);
        true
    }
}

/// Explorer following a fixed script of move instructions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Adventurer {
    name: String,
    cell: CellCoord,
    orientation: Orientation,
    pending_moves: VecDeque<Move>,
    just_moved: bool,
    treasures_collected: u32,
}

impl Adventurer {
    /// Creates an adventurer that has not moved or collected anything yet.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        cell: CellCoord,
        orientation: Orientation,
        moves: impl IntoIterator<Item = Move>,
    ) -> Self {
        Self {
            name: name.into(),
            cell,
            orientation,
            pending_moves: moves.into_iter().collect(),
            just_moved: false,
            treasures_collected: 0,
        }
    }

    /// Name given to the adventurer in the map document.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell the adventurer currently stands on.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Direction the adventurer is facing.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Instructions not yet executed, front first.
    #[must_use]
    pub fn pending_moves(&self) -> &VecDeque<Move> {
        &self.pending_moves
    }

    /// Reports whether any instruction remains to be executed.
    #[must_use]
    pub fn has_pending_moves(&self) -> bool {
        !self.pending_moves.is_empty()
    }

    /// Whether the last tick ended with a successful forward step.
    #[must_use]
    pub const fn just_moved(&self) -> bool {
        self.just_moved
    }

    /// Number of treasure units dug up so far.
    #[must_use]
    pub const fn treasures_collected(&self) -> u32 {
        self.treasures_collected
    }

    /// Removes and returns the next instruction to execute.
    pub fn pop_move(&mut self) -> Option<Move> {
        self.pending_moves.pop_front()
    }

    /// Rotates in place to face `orientation`.
    pub fn face(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.just_moved = false;
    }

    /// Moves onto `cell` after a successful forward step.
    pub fn advance(&mut self, cell: CellCoord) {
        self.cell = cell;
        self.just_moved = true;
    }

    /// Stays in place for this tick.
    pub fn hold(&mut self) {
        self.just_moved = false;
    }

    /// Credits one dug-up treasure unit.
    pub fn record_collection(&mut self) {
        self.treasures_collected = self.treasures_collected.saturating_add(1);
    }
}

/// Query functions that provide read-only access to a map.
pub mod query {
    use treasure_hunt_core::{CellCoord, Square};

    use super::{Adventurer, TreasureMap};

    /// Returns the first adventurer (in priority order) standing on `cell`.
    #[must_use]
    pub fn adventurer_at(map: &TreasureMap, cell: CellCoord) -> Option<&Adventurer> {
        map.adventurers
            .iter()
            .find(|adventurer| adventurer.cell == cell)
    }

    /// Total number of treasure units still lying on the grid.
    #[must_use]
    pub fn remaining_treasure(map: &TreasureMap) -> u64 {
        map.squares()
            .map(|(_, square)| match square {
                Square::Treasure(amount) => u64::from(amount),
                Square::Empty | Square::Mountain => 0,
            })
            .sum()
    }

    /// Total number of treasure units dug up by all adventurers.
    #[must_use]
    pub fn collected_treasure(map: &TreasureMap) -> u64 {
        map.adventurers
            .iter()
            .map(|adventurer| u64::from(adventurer.treasures_collected))
            .sum()
    }

    /// Number of mountain squares on the grid.
    #[must_use]
    pub fn mountain_count(map: &TreasureMap) -> usize {
        map.squares()
            .filter(|(_, square)| square.is_blocking())
            .count()
    }

    /// Length of the longest remaining move script.
    ///
    /// This bounds the number of ticks left before every adventurer is idle.
    #[must_use]
    pub fn longest_pending_script(map: &TreasureMap) -> usize {
        map.adventurers
            .iter()
            .map(|adventurer| adventurer.pending_moves.len())
            .max()
            .unwrap_or(0)
    }
}
