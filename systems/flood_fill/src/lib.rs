#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Incremental flood-fill planner that steers the mouse toward the maze centre.
//!
//! The planner keeps two pieces of belief: the [`WallKnowledge`] gathered from
//! heading-relative sensing and a [`DistanceField`] estimating the remaining
//! hops to the goal region. Each tick it folds the new reading into the wall
//! knowledge, walks downhill on the distance field in a fixed
//! [`DirectionPriority`], and repairs the field with a local reflow whenever no
//! neighbour is strictly closer to the goal. Rotations are always followed by a
//! forced advance on the next tick so that every cell transition is one turn
//! plus one forward move.

mod distance;
mod knowledge;
mod policy;
mod reflow;

use log::{debug, info, trace, warn};
use micromouse_core::{
    CellCoord, GoalRegion, GridSize, Heading, Movement, Planner, Pose, RunOutcome, SensorReading,
};

pub use distance::DistanceField;
pub use knowledge::WallKnowledge;
pub use policy::{DirectionPriority, DirectionPriorityError};

use reflow::Reflow;

/// Hop count beyond which a reflow declares the goal unreachable.
pub const DEFAULT_GIVE_UP_THRESHOLD: u32 = 300;

/// Tunables supplied when constructing a [`FloodFill`] planner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloodFillConfig {
    /// Reflow aborts once every open neighbour of a cell lies beyond this distance.
    pub give_up_threshold: u32,
    /// Order in which absolute directions are tried.
    pub priority: DirectionPriority,
    /// Pose the mouse occupies before the first tick.
    pub start: Pose,
}

impl Default for FloodFillConfig {
    fn default() -> Self {
        Self {
            give_up_threshold: DEFAULT_GIVE_UP_THRESHOLD,
            priority: DirectionPriority::default(),
            start: Pose::START,
        }
    }
}

/// Turn-then-advance protocol state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The next tick consults the direction policy.
    Deciding,
    /// A rotation was just issued; the next tick advances unconditionally.
    CommittedForward,
}

/// Flood-fill maze solver.
#[derive(Clone, Debug)]
pub struct FloodFill {
    config: FloodFillConfig,
    goal: GoalRegion,
    heading: Heading,
    phase: Phase,
    knowledge: WallKnowledge,
    field: DistanceField,
    reflows: u32,
}

impl FloodFill {
    /// Creates a planner for a maze of the given size using default tunables.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self::with_config(size, FloodFillConfig::default())
    }

    /// Creates a planner with explicit tunables.
    #[must_use]
    pub fn with_config(size: GridSize, config: FloodFillConfig) -> Self {
        Self {
            goal: GoalRegion::centered(size),
            heading: config.start.heading,
            phase: Phase::Deciding,
            knowledge: WallKnowledge::seeded(size, config.start),
            field: DistanceField::open_maze(size),
            reflows: 0,
            config,
        }
    }

    /// Heading the planner believes the mouse faces.
    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    /// Current state of the turn-then-advance protocol.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Walls discovered so far.
    #[must_use]
    pub const fn knowledge(&self) -> &WallKnowledge {
        &self.knowledge
    }

    /// Current distance estimates.
    #[must_use]
    pub const fn distance_field(&self) -> &DistanceField {
        &self.field
    }

    /// Cells the planner is steering toward.
    #[must_use]
    pub const fn goal(&self) -> GoalRegion {
        self.goal
    }

    /// Number of reflow passes run since construction.
    #[must_use]
    pub const fn reflow_count(&self) -> u32 {
        self.reflows
    }

    /// Chooses an improving direction, reflowing the field until one appears.
    ///
    /// Every retry follows a reflow that raised the distance at `cell`, and a
    /// reflow never raises a cell past the give-up threshold, so the loop is
    /// bounded.
    fn decide(&mut self, cell: CellCoord) -> Option<Heading> {
        loop {
            if let Some(direction) =
                policy::choose_direction(cell, &self.knowledge, &self.field, &self.config.priority)
            {
                return Some(direction);
            }

            let before = self.field.distance(cell)?;
            self.reflows = self.reflows.saturating_add(1);
            debug!(
                "reflow #{} seeded at ({}, {}) with distance {before}",
                self.reflows,
                cell.x(),
                cell.y()
            );

            match reflow::reflow(
                cell,
                &self.knowledge,
                &mut self.field,
                self.goal,
                self.config.give_up_threshold,
            ) {
                Reflow::Unreachable => {
                    warn!(
                        "reflow exceeded {} hops; goal unreachable from ({}, {})",
                        self.config.give_up_threshold,
                        cell.x(),
                        cell.y()
                    );
                    return None;
                }
                Reflow::Settled { relaxed } => {
                    let after = self.field.distance(cell)?;
                    debug!("reflow settled after raising {relaxed} cells; distance now {after}");
                    if after == before {
                        warn!(
                            "no open neighbour around ({}, {}); goal unreachable",
                            cell.x(),
                            cell.y()
                        );
                        return None;
                    }
                }
            }
        }
    }

    fn steer(&mut self, direction: Heading) -> Movement {
        let turns = self.heading.turns_to(direction);
        self.heading = direction;

        if turns != 0 {
            self.phase = Phase::CommittedForward;
        }

        Movement::from_quarter_turns(turns)
    }
}

impl Planner for FloodFill {
    fn next_movement(&mut self, cell: CellCoord, reading: SensorReading) -> Movement {
        if self.goal.contains(cell) {
            info!("reached goal cell ({}, {})", cell.x(), cell.y());
            return Movement::Finish(RunOutcome::ReachedGoal);
        }

        let learned = self
            .knowledge
            .record(Pose::new(cell, self.heading), reading);
        if learned > 0 {
            trace!("learned {learned} walls at ({}, {})", cell.x(), cell.y());
        }

        if self.phase == Phase::CommittedForward {
            self.phase = Phase::Deciding;
            return Movement::Advance;
        }

        let movement = match self.decide(cell) {
            Some(direction) => self.steer(direction),
            None => Movement::Finish(RunOutcome::GaveUp),
        };
        trace!(
            "({}, {}) facing {:?}: {movement:?}",
            cell.x(),
            cell.y(),
            self.heading
        );
        movement
    }
}
