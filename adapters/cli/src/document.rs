//! Loading and emitting map documents for the command-line adapter.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::ValueEnum;
use treasure_hunt_system_codec::{write, EXAMPLE_MAP};
use treasure_hunt_world::TreasureMap;

/// Label reported for the bundled example document.
const EXAMPLE_LABEL: &str = "example.txt";

/// Raw map document together with a label describing where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MapSource {
    pub(crate) label: String,
    pub(crate) text: String,
}

impl MapSource {
    /// Reads the document at `path`, or the bundled example when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self {
                label: EXAMPLE_LABEL.to_owned(),
                text: EXAMPLE_MAP.to_owned(),
            });
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read map document at {}", path.display()))?;
        Ok(Self {
            label: path.display().to_string(),
            text,
        })
    }
}

/// Representation used when emitting the resulting map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Line-oriented map document.
    #[default]
    Text,
    /// Pretty-printed JSON snapshot of the full map state.
    Json,
}

impl OutputFormat {
    pub(crate) fn render(self, map: &TreasureMap) -> Result<String> {
        match self {
            Self::Text => Ok(write(map)),
            Self::Json => {
                serde_json::to_string_pretty(map).context("failed to serialise map snapshot")
            }
        }
    }
}

/// Writes `contents` to `path`, or to stdout when no path is given.
pub(crate) fn emit(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, format!("{contents}\n"))
            .with_context(|| format!("failed to write map document to {}", path.display())),
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}
