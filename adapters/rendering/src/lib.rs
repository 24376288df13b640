#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text rendering contracts for Treasure Hunt adapters.
//!
//! A [`Scene`] is a presentation-only copy of a map snapshot: one glyph per
//! cell, with adventurers drawn over the terrain they stand on. Adapters build
//! a scene from a snapshot and print it; nothing flows back into the world.

use std::fmt;

use treasure_hunt_core::{CellCoord, Orientation, Square};
use treasure_hunt_world::{query, TreasureMap};

/// Glyph presented for a single grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    /// Open ground.
    Empty,
    /// Impassable terrain.
    Mountain,
    /// Treasure pile with the remaining number of units.
    Treasure(u32),
    /// Adventurer standing on the cell.
    Adventurer {
        /// Name of the adventurer.
        name: String,
        /// Direction the adventurer is facing.
        orientation: Orientation,
    },
}

impl Glyph {
    fn label(&self) -> String {
        match self {
            Self::Empty => ".".to_owned(),
            Self::Mountain => "M".to_owned(),
            Self::Treasure(amount) => format!("T({amount})"),
            Self::Adventurer { name, orientation } => {
                format!("A({name}){}", orientation.letter())
            }
        }
    }
}

impl From<Square> for Glyph {
    fn from(square: Square) -> Self {
        match square {
            Square::Empty => Self::Empty,
            Square::Mountain => Self::Mountain,
            Square::Treasure(amount) => Self::Treasure(amount),
        }
    }
}

/// Row-major glyph grid captured from a map snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    columns: u32,
    rows: u32,
    glyphs: Vec<Glyph>,
}

impl Scene {
    /// Captures the glyphs for every cell of `map`.
    #[must_use]
    pub fn from_map(map: &TreasureMap) -> Self {
        let glyphs = map
            .squares()
            .map(|(cell, square)| match query::adventurer_at(map, cell) {
                Some(adventurer) => Glyph::Adventurer {
                    name: adventurer.name().to_owned(),
                    orientation: adventurer.orientation(),
                },
                None => Glyph::from(square),
            })
            .collect();

        Self {
            columns: map.width(),
            rows: map.height(),
            glyphs,
        }
    }

    /// Dimensions of the scene as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Glyph presented at `cell`, if it lies inside the scene.
    #[must_use]
    pub fn glyph(&self, cell: CellCoord) -> Option<&Glyph> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        self.glyphs.get(row * width + column)
    }

    fn rows(&self) -> impl Iterator<Item = &[Glyph]> + '_ {
        let width = usize::try_from(self.columns).unwrap_or(0).max(1);
        self.glyphs.chunks(width)
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<Vec<String>> = self
            .rows()
            .map(|row| row.iter().map(Glyph::label).collect())
            .collect();
        let cell_width = labels
            .iter()
            .flatten()
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(1);

        for (index, row) in labels.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .map(|label| format!("{label:<cell_width$}"))
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treasure_hunt_core::Move;
    use treasure_hunt_world::Adventurer;

    fn sample_map() -> TreasureMap {
        let mut map = TreasureMap::new(3, 2).expect("map fits");
        assert!(map.set_square(CellCoord::new(1, 0), Square::Mountain));
        assert!(map.set_square(CellCoord::new(2, 1), Square::Treasure(2)));
        assert!(map.set_square(CellCoord::new(0, 1), Square::Treasure(1)));
        let lara = Adventurer::new(
            "Lara",
            CellCoord::new(0, 1),
            Orientation::South,
            [Move::Forward],
        );
        assert!(map.push_adventurer(lara));
        map
    }

    #[test]
    fn adventurer_hides_the_square_beneath() {
        let scene = Scene::from_map(&sample_map());

        assert_eq!(scene.dimensions(), (3, 2));
        assert_eq!(
            scene.glyph(CellCoord::new(0, 1)),
            Some(&Glyph::Adventurer {
                name: "Lara".to_owned(),
                orientation: Orientation::South,
            })
        );
        assert_eq!(scene.glyph(CellCoord::new(1, 0)), Some(&Glyph::Mountain));
        assert_eq!(scene.glyph(CellCoord::new(2, 1)), Some(&Glyph::Treasure(2)));
        assert_eq!(scene.glyph(CellCoord::new(3, 0)), None);
    }

    #[test]
    fn display_pads_columns_to_widest_glyph() {
        let scene = Scene::from_map(&sample_map());

        assert_eq!(
            scene.to_string(),
            ".        M        .\nA(Lara)S .        T(2)"
        );
    }

    #[test]
    fn adventurer_label_shows_facing() {
        let mut map = TreasureMap::new(1, 1).expect("map fits");
        let venus = Adventurer::new("Venus", CellCoord::new(0, 0), Orientation::West, []);
        assert!(map.push_adventurer(venus));

        assert_eq!(Scene::from_map(&map).to_string(), "A(Venus)W");
    }

    #[test]
    fn empty_scene_renders_nothing() {
        let scene = Scene::from_map(&TreasureMap::new(0, 0).expect("map fits"));
        assert_eq!(scene.to_string(), "");
    }
}
