#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Treasure Hunt expeditions.

mod document;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use treasure_hunt_rendering::Scene;
use treasure_hunt_system_codec::parse;
use treasure_hunt_system_simulation::Timeline;
use treasure_hunt_world::query;

use crate::document::{emit, MapSource, OutputFormat};

/// Simulates adventurers hunting for treasure on a scripted map.
#[derive(Debug, Parser)]
#[command(name = "treasure-hunt", version, about)]
struct Cli {
    /// Emit debug-level logs on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Runs a map document and emits the resulting state.
    Run(RunArgs),
    /// Validates a map document without running it.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Map document to simulate.
    #[arg(required_unless_present = "example", conflicts_with = "example")]
    input: Option<PathBuf>,
    /// Simulate the bundled example document instead of a file.
    #[arg(long)]
    example: bool,
    /// Write the result to this path instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Representation of the emitted map.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Stop after this many turns instead of running to completion.
    #[arg(long)]
    turns: Option<usize>,
    /// Print the grid after every turn.
    #[arg(long)]
    show_steps: bool,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Map document to validate.
    input: PathBuf,
}

/// Entry point for the Treasure Hunt command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        CliCommand::Run(args) => run(args),
        CliCommand::Check(args) => check(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let source = MapSource::load(args.input.as_deref())?;
    let map = parse(&source.text).with_context(|| format!("failed to load {}", source.label))?;
    info!(
        source = %source.label,
        width = map.width(),
        height = map.height(),
        adventurers = map.adventurers().len(),
        "map loaded"
    );

    let mut timeline = Timeline::new(map);
    match args.turns {
        Some(turns) => {
            let reached = timeline.seek(turns);
            if reached < turns {
                info!(requested = turns, reached, "adventurers ran out of moves early");
            }
        }
        None => timeline.finish(),
    }
    info!(
        turns = timeline.turn(),
        collected = query::collected_treasure(timeline.current()),
        remaining = query::remaining_treasure(timeline.current()),
        "expedition finished"
    );

    if args.show_steps {
        for (turn, snapshot) in timeline.snapshots().enumerate() {
            println!("Turn {turn}:\n{}\n", Scene::from_map(snapshot));
        }
    }

    let rendered = args.format.render(timeline.current())?;
    emit(args.output.as_deref(), &rendered)
}

fn check(args: CheckArgs) -> Result<()> {
    let source = MapSource::load(Some(&args.input))?;
    let map = parse(&source.text).with_context(|| format!("failed to load {}", source.label))?;

    println!(
        "{}: {}x{} map, {} mountain(s), {} treasure unit(s), {} adventurer(s), up to {} turn(s)",
        source.label,
        map.width(),
        map.height(),
        query::mountain_count(&map),
        query::remaining_treasure(&map),
        map.adventurers().len(),
        query::longest_pending_script(&map)
    );
    Ok(())
}
