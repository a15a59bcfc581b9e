#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the flood-fill mouse through a maze.

use std::{
    fs,
    io::{self, BufRead},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use micromouse_core::{GridSize, RunOutcome};
use micromouse_system_flood_fill::{
    DirectionPriority, FloodFill, FloodFillConfig, DEFAULT_GIVE_UP_THRESHOLD,
};
use micromouse_system_simulation::{RunReport, RunStatus, Simulation, TickBudget};
use micromouse_world::{self as world, query, Maze, World};
use serde::Serialize;

/// Largest accepted `--give-up-threshold`; each reflow may climb this far.
const MAX_GIVE_UP_THRESHOLD: i64 = 1_000_000;

/// Flood-fill micromouse simulator.
#[derive(Debug, Parser)]
#[command(name = "micromouse", version)]
struct Cli {
    /// Side length of an open maze, used when no layout file is given.
    #[arg(long, default_value_t = 16)]
    size: u32,
    /// ASCII maze layout to explore instead of an open maze.
    #[arg(long, value_name = "PATH", conflicts_with = "size")]
    maze: Option<PathBuf>,
    /// Maximum number of ticks before the run is abandoned.
    #[arg(long, value_name = "TICKS")]
    tick_budget: Option<u64>,
    /// Distance beyond which the planner declares the goal unreachable.
    #[arg(
        long,
        value_name = "HOPS",
        default_value_t = DEFAULT_GIVE_UP_THRESHOLD,
        value_parser = clap::value_parser!(u32).range(..=MAX_GIVE_UP_THRESHOLD)
    )]
    give_up_threshold: u32,
    /// Order in which absolute directions break ties, e.g. NESW.
    #[arg(long, value_name = "ORDER", default_value = "NESW")]
    priority: DirectionPriority,
    /// Draw the maze after every tick.
    #[arg(long)]
    render: bool,
    /// Wait for Enter between ticks.
    #[arg(long)]
    pause: bool,
    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    size: u32,
    reflows: u32,
    known_walls: usize,
    report: &'a RunReport,
}

/// Entry point for the micromouse command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let maze = load_maze(&cli)?;
    let size = maze.size();
    info!("exploring a {0}x{0} maze", size.get());

    let config = FloodFillConfig {
        give_up_threshold: cli.give_up_threshold,
        priority: cli.priority,
        ..FloodFillConfig::default()
    };
    let mut planner = FloodFill::with_config(size, config);
    let mut world = World::new(maze);
    let budget = cli
        .tick_budget
        .map_or_else(|| TickBudget::for_grid(size), TickBudget::new);

    if cli.render {
        println!("{}", query::render(&world));
    }

    let stdin = io::stdin();
    let mut stdin_error = None;
    let report = Simulation::new(budget).run_with(&mut world, &mut planner, |world, movement, _| {
        if cli.render {
            println!("{movement:?}");
            println!("{}", query::render(world));
        }
        if cli.pause && stdin_error.is_none() {
            println!("Hit enter to continue...");
            let mut line = String::new();
            if let Err(error) = stdin.lock().read_line(&mut line) {
                stdin_error = Some(error);
            }
        }
    });
    if let Some(error) = stdin_error {
        return Err(error).context("failed to wait for Enter on stdin");
    }

    let summary = Summary {
        size: size.get(),
        reflows: planner.reflow_count(),
        known_walls: planner.knowledge().blocked_edges(),
        report: &report,
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
        println!("{json}");
    } else {
        println!("{}", describe(&summary));
    }

    Ok(())
}

fn load_maze(cli: &Cli) -> Result<Maze> {
    match &cli.maze {
        Some(path) => {
            let layout = fs::read_to_string(path)
                .with_context(|| format!("failed to read maze layout {}", path.display()))?;
            world::parse(&layout)
                .with_context(|| format!("invalid maze layout {}", path.display()))
        }
        None => {
            let size = GridSize::new(cli.size).context("invalid --size")?;
            Ok(Maze::open(size))
        }
    }
}

fn describe(summary: &Summary<'_>) -> String {
    let report = summary.report;
    match report.status {
        RunStatus::Finished(RunOutcome::ReachedGoal) => format!(
            "Found the centre in {} ticks ({} reflows, {} walls mapped).",
            report.ticks, summary.reflows, summary.known_walls
        ),
        RunStatus::Finished(RunOutcome::GaveUp) => format!(
            "Unable to find the centre, gave up after {} ticks ({} reflows).",
            report.ticks, summary.reflows
        ),
        RunStatus::BudgetExhausted => {
            format!("Ran out of ticks after {} without finishing.", report.ticks)
        }
    }
}
