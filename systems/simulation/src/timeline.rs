//! Snapshot history that supports stepping a simulation back and forth.

use treasure_hunt_world::TreasureMap;

use crate::{can_still_move, tick};

/// Ordered history of map snapshots, one per applied turn.
///
/// The map the timeline was created with is never removed. Stepping back
/// drops the latest snapshot; earlier snapshots are never modified.
#[derive(Clone, Debug)]
pub struct Timeline {
    initial: TreasureMap,
    turns: Vec<TreasureMap>,
}

impl Timeline {
    /// Creates a timeline whose only snapshot is `initial`.
    #[must_use]
    pub fn new(initial: TreasureMap) -> Self {
        Self {
            initial,
            turns: Vec::new(),
        }
    }

    /// Snapshot the timeline was created with.
    #[must_use]
    pub fn initial(&self) -> &TreasureMap {
        &self.initial
    }

    /// Latest snapshot.
    #[must_use]
    pub fn current(&self) -> &TreasureMap {
        self.turns.last().unwrap_or(&self.initial)
    }

    /// Number of turns applied since the initial snapshot.
    #[must_use]
    pub fn turn(&self) -> usize {
        self.turns.len()
    }

    /// Iterates all snapshots from the initial one up to the current turn.
    pub fn snapshots(&self) -> impl Iterator<Item = &TreasureMap> + '_ {
        std::iter::once(&self.initial).chain(self.turns.iter())
    }

    /// Reports whether another turn can be played from the current snapshot.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        can_still_move(self.current().adventurers())
    }

    /// Plays one more turn, returning `false` when every adventurer is idle.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        let next = tick(self.current());
        self.turns.push(next);
        true
    }

    /// Steps back one turn, returning `false` when already at the initial snapshot.
    pub fn step_back(&mut self) -> bool {
        self.turns.pop().is_some()
    }

    /// Discards every turn, returning to the initial snapshot.
    pub fn reset(&mut self) {
        self.turns.clear();
    }

    /// Plays turns until every adventurer is idle.
    pub fn finish(&mut self) {
        while self.advance() {}
    }

    /// Moves to `turn`, stepping back or playing turns as needed.
    ///
    /// Stops early when the adventurers run out of moves and returns the turn
    /// actually reached.
    pub fn seek(&mut self, turn: usize) -> usize {
        self.turns.truncate(turn);
        while self.turn() < turn && self.advance() {}
        self.turn()
    }
}
