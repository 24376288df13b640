#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Line-oriented text codec for Treasure Hunt map documents.
//!
//! A document starts with a `C - <width> - <height>` metadata line followed by
//! mountain (`M`), treasure (`T`) and adventurer (`A`) directives, one per
//! line, with fields separated by a literal `" - "`. Empty lines and lines
//! starting with `#` are ignored anywhere.

use thiserror::Error;
use tracing::debug;
use treasure_hunt_core::{CellCoord, Move, Orientation, Square};
use treasure_hunt_world::{Adventurer, TreasureMap};

/// Separator placed between every field of a directive.
const FIELD_DELIMITER: &str = " - ";
/// Prefix marking a comment line.
const COMMENT_PREFIX: char = '#';

/// Canonical example document bundled with the engine.
pub const EXAMPLE_MAP: &str = "\
C - 3 - 4
M - 1 - 0
M - 2 - 1
T - 0 - 3 - 2
T - 1 - 3 - 3
A - Lara - 1 - 1 - S - AADADAGGA";

/// Failure raised while parsing a map document.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid map format: {reason} on line {line} (got \"{content}\")")]
pub struct FormatError {
    line: usize,
    content: String,
    reason: FormatErrorReason,
}

impl FormatError {
    fn new(line: usize, content: &str, reason: FormatErrorReason) -> Self {
        Self {
            line,
            content: content.to_owned(),
            reason,
        }
    }

    /// One-based number of the offending line.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Raw content of the offending line.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Specific reason the line was rejected.
    #[must_use]
    pub const fn reason(&self) -> FormatErrorReason {
        self.reason
    }
}

/// Reasons a map document line may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum FormatErrorReason {
    /// The first significant line was not a `C` metadata line.
    #[error("no or incorrect metadata (C) line")]
    MissingMetadata,
    /// The line matched none of the directive grammars.
    #[error("unexpected line")]
    UnexpectedLine,
    /// The directive referenced a cell outside the grid.
    #[error("coordinates outside the map")]
    OutOfBounds,
    /// The metadata line declared more cells than a map can hold.
    #[error("map dimensions too large")]
    MapTooLarge,
}

/// Parses a map document into a fresh [`TreasureMap`].
///
/// Later directives for the same cell overwrite earlier ones, and adventurers
/// keep the order in which they appear, which is also their movement priority.
/// The first malformed line aborts the parse.
pub fn parse(input: &str) -> Result<TreasureMap, FormatError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| is_significant(line));

    let Some((metadata_line, metadata)) = lines.next() else {
        let line = input.lines().count() + 1;
        return Err(FormatError::new(line, "", FormatErrorReason::MissingMetadata));
    };
    let (width, height) = parse_metadata(metadata).ok_or_else(|| {
        FormatError::new(metadata_line, metadata, FormatErrorReason::MissingMetadata)
    })?;

    let mut map = TreasureMap::new(width, height).map_err(|error| {
        debug!(%error, "rejected map dimensions");
        FormatError::new(metadata_line, metadata, FormatErrorReason::MapTooLarge)
    })?;
    for (number, line) in lines {
        let directive = parse_directive(line)
            .ok_or_else(|| FormatError::new(number, line, FormatErrorReason::UnexpectedLine))?;
        if !apply_directive(&mut map, directive) {
            return Err(FormatError::new(number, line, FormatErrorReason::OutOfBounds));
        }
    }

    debug!(
        width,
        height,
        adventurers = map.adventurers().len(),
        "parsed map document"
    );
    Ok(map)
}

/// Serialises a map into its document form.
///
/// Adventurer lines carry the number of treasures collected rather than the
/// remaining moves, so the output describes a finished expedition.
#[must_use]
pub fn write(map: &TreasureMap) -> String {
    let metadata = format!("C - {} - {}", map.width(), map.height());
    let squares = map.squares().filter_map(|(cell, square)| match square {
        Square::Empty => None,
        Square::Mountain => Some(format!("M - {} - {}", cell.column(), cell.row())),
        Square::Treasure(amount) => Some(format!(
            "T - {} - {} - {amount}",
            cell.column(),
            cell.row()
        )),
    });
    let adventurers = map.adventurers().iter().map(|adventurer| {
        let cell = adventurer.cell();
        format!(
            "A - {} - {} - {} - {} - {}",
            adventurer.name(),
            cell.column(),
            cell.row(),
            adventurer.orientation().letter(),
            adventurer.treasures_collected()
        )
    });

    std::iter::once(metadata)
        .chain(squares)
        .chain(adventurers)
        .collect::<Vec<_>>()
        .join("\n")
}

enum Directive {
    Mountain(CellCoord),
    Treasure(CellCoord, u32),
    Adventurer(Adventurer),
}

fn is_significant(line: &str) -> bool {
    !line.is_empty() && !line.starts_with(COMMENT_PREFIX)
}

fn parse_metadata(line: &str) -> Option<(u32, u32)> {
    match fields(line).as_slice() {
        ["C", width, height] => Some((parse_number(width)?, parse_number(height)?)),
        _ => None,
    }
}

fn parse_directive(line: &str) -> Option<Directive> {
    match fields(line).as_slice() {
        ["M", x, y] => Some(Directive::Mountain(parse_cell(x, y)?)),
        ["T", x, y, amount] => Some(Directive::Treasure(
            parse_cell(x, y)?,
            parse_number(amount)?,
        )),
        ["A", name, x, y, orientation, moves] => {
            if !is_name(name) {
                return None;
            }
            let cell = parse_cell(x, y)?;
            let orientation = parse_orientation(orientation)?;
            let moves = parse_moves(moves)?;
            Some(Directive::Adventurer(Adventurer::new(
                *name,
                cell,
                orientation,
                moves,
            )))
        }
        _ => None,
    }
}

fn apply_directive(map: &mut TreasureMap, directive: Directive) -> bool {
    match directive {
        Directive::Mountain(cell) => map.set_square(cell, Square::Mountain),
        Directive::Treasure(cell, 0) => map.set_square(cell, Square::Empty),
        Directive::Treasure(cell, amount) => map.set_square(cell, Square::Treasure(amount)),
        Directive::Adventurer(adventurer) => map.push_adventurer(adventurer),
    }
}

fn fields(line: &str) -> Vec<&str> {
    line.split(FIELD_DELIMITER).collect()
}

fn parse_number(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_cell(x: &str, y: &str) -> Option<CellCoord> {
    Some(CellCoord::new(parse_number(x)?, parse_number(y)?))
}

fn is_name(field: &str) -> bool {
    !field.is_empty()
        && field
            .chars()
            .all(|character| character.is_alphanumeric() || character == '_')
}

fn parse_orientation(field: &str) -> Option<Orientation> {
    let mut characters = field.chars();
    let letter = characters.next()?;
    if characters.next().is_some() {
        return None;
    }
    Orientation::from_letter(letter)
}

fn parse_moves(field: &str) -> Option<Vec<Move>> {
    if field.is_empty() {
        return None;
    }
    field.chars().map(Move::from_letter).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_reject_signs_and_padding() {
        assert_eq!(parse_number("12"), Some(12));
        assert_eq!(parse_number("+1"), None);
        assert_eq!(parse_number(" 1"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("99999999999"), None);
    }

    #[test]
    fn names_are_word_characters() {
        assert!(is_name("Lara_Croft2"));
        assert!(!is_name("Lara Croft"));
        assert!(!is_name(""));
        assert!(!is_name("Lara-Croft"));
    }

    #[test]
    fn orientation_requires_single_letter() {
        assert_eq!(parse_orientation("S"), Some(Orientation::South));
        assert_eq!(parse_orientation("SS"), None);
        assert_eq!(parse_orientation(""), None);
    }

    #[test]
    fn moves_reject_unknown_letters() {
        assert_eq!(
            parse_moves("AGD"),
            Some(vec![Move::Forward, Move::TurnLeft, Move::TurnRight])
        );
        assert_eq!(parse_moves("AX"), None);
        assert_eq!(parse_moves(""), None);
    }

    #[test]
    fn error_message_names_line_and_content() {
        let error = FormatError::new(3, "Q - 1", FormatErrorReason::UnexpectedLine);
        assert_eq!(
            error.to_string(),
            "invalid map format: unexpected line on line 3 (got \"Q - 1\")"
        );
    }
}
