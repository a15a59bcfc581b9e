#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze and mouse state.
//!
//! The world owns the ground-truth walls and the mouse's real pose. Planners
//! never see it directly: they receive sensor readings captured through
//! [`query::sensor_view`], and their movements are executed through [`apply`],
//! which refuses to drive the mouse through walls.

mod layout;
mod maze;

use log::trace;
use micromouse_core::{CellCoord, Event, GoalRegion, Movement, Pose, RunOutcome};
use thiserror::Error;

pub use layout::{parse, render, LayoutError};
pub use maze::Maze;

/// Errors raised while assembling a world.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// The requested start pose does not lie inside the maze.
    #[error("start cell ({}, {}) lies outside the {side}x{side} maze", .cell.x(), .cell.y())]
    StartOutsideMaze {
        /// Requested start cell.
        cell: CellCoord,
        /// Side length of the maze.
        side: u32,
    },
}

/// Represents the authoritative micromouse world.
#[derive(Clone, Debug)]
pub struct World {
    maze: Maze,
    goal: GoalRegion,
    pose: Pose,
    outcome: Option<RunOutcome>,
    tick_index: u64,
}

impl World {
    /// Places the mouse at the conventional start pose of the maze.
    #[must_use]
    pub fn new(maze: Maze) -> Self {
        Self {
            goal: GoalRegion::centered(maze.size()),
            maze,
            pose: Pose::START,
            outcome: None,
            tick_index: 0,
        }
    }

    /// Places the mouse at an explicit start pose.
    pub fn with_start(maze: Maze, start: Pose) -> Result<Self, WorldError> {
        let size = maze.size();
        if !size.contains(start.cell) {
            return Err(WorldError::StartOutsideMaze {
                cell: start.cell,
                side: size.get(),
            });
        }

        let mut world = Self::new(maze);
        world.pose = start;
        Ok(world)
    }
}

/// Applies the provided movement to the world, mutating state deterministically.
///
/// Advances into a wall leave the mouse in place and report
/// [`Event::AdvanceBlocked`]. Movements received after the run finished are
/// ignored.
pub fn apply(world: &mut World, movement: Movement, out_events: &mut Vec<Event>) {
    if world.outcome.is_some() {
        return;
    }

    world.tick_index = world.tick_index.saturating_add(1);
    let Pose { cell, heading } = world.pose;

    match movement {
        Movement::Advance => {
            let destination = if world.maze.has_wall(cell, heading) {
                None
            } else {
                cell.step(heading, world.maze.size())
            };

            match destination {
                Some(to) => {
                    world.pose.cell = to;
                    out_events.push(Event::MouseAdvanced { from: cell, to });
                }
                None => {
                    trace!("advance from ({}, {}) blocked", cell.x(), cell.y());
                    out_events.push(Event::AdvanceBlocked { cell, heading });
                }
            }
        }
        Movement::Finish(outcome) => {
            world.outcome = Some(outcome);
            out_events.push(Event::RunFinished { cell, outcome });
        }
        Movement::RotateClockwise
        | Movement::RotateCounterClockwise
        | Movement::RotateAround => {
            let turns = movement.rotation().unwrap_or(0);
            let to = heading.rotated(turns);
            world.pose.heading = to;
            out_events.push(Event::MouseRotated { from: heading, to });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use micromouse_core::{MazeView, Pose, RunOutcome, SensorReading};

    use super::{Maze, World};

    /// Current pose of the mouse.
    #[must_use]
    pub fn pose(world: &World) -> Pose {
        world.pose
    }

    /// Outcome of the run, once a terminal movement was applied.
    #[must_use]
    pub fn outcome(world: &World) -> Option<RunOutcome> {
        world.outcome
    }

    /// Number of movements applied so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Heading-relative view of the walls around the mouse.
    #[must_use]
    pub fn sensor_view(world: &World) -> SensorView<'_> {
        SensorView {
            maze: &world.maze,
            pose: world.pose,
        }
    }

    /// Captures all three wall sensors at the mouse's current pose.
    #[must_use]
    pub fn sensor_reading(world: &World) -> SensorReading {
        SensorReading::capture(&sensor_view(world))
    }

    /// Draws the maze with the mouse and the goal region marked.
    #[must_use]
    pub fn render(world: &World) -> String {
        super::render(&world.maze, world.goal, world.pose)
    }

    /// Sensors mounted on the mouse, reading the ground-truth walls.
    #[derive(Clone, Copy, Debug)]
    pub struct SensorView<'a> {
        maze: &'a Maze,
        pose: Pose,
    }

    impl MazeView for SensorView<'_> {
        fn wall_ahead(&self) -> bool {
            self.maze.has_wall(self.pose.cell, self.pose.heading)
        }

        fn wall_on_left(&self) -> bool {
            self.maze
                .has_wall(self.pose.cell, self.pose.heading.counter_clockwise())
        }

        fn wall_on_right(&self) -> bool {
            self.maze
                .has_wall(self.pose.cell, self.pose.heading.clockwise())
        }
    }
}
