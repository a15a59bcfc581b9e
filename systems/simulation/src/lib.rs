#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick-driven driver that pumps a planner against the authoritative world.
//!
//! Planners only bound the work done inside a single tick. The driver owns the
//! independent [`TickBudget`] that caps a whole run, so a planner that wanders
//! forever still terminates with [`RunStatus::BudgetExhausted`].

use log::{info, warn};
use micromouse_core::{Event, GridSize, Movement, Planner, Pose, RunOutcome};
use micromouse_world::{self as world, query, World};
use serde::Serialize;

/// Maximum number of ticks a run may take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TickBudget(u64);

impl TickBudget {
    /// Creates a budget of exactly `ticks` ticks.
    #[must_use]
    pub const fn new(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Generous default for a maze: four ticks per cell plus slack.
    #[must_use]
    pub fn for_grid(size: GridSize) -> Self {
        let side = u64::from(size.get());
        Self(side.saturating_mul(side).saturating_mul(4).saturating_add(16))
    }

    /// Number of ticks allowed.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RunStatus {
    /// The planner issued a terminal movement.
    Finished(RunOutcome),
    /// The tick budget ran out before the planner finished.
    BudgetExhausted,
}

/// Summary of a completed run.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RunReport {
    /// How the run ended.
    pub status: RunStatus,
    /// Number of ticks consumed, including the terminal one.
    pub ticks: u64,
    /// Every movement issued, in order.
    pub trace: Vec<Movement>,
    /// Pose of the mouse when the run ended.
    pub final_pose: Pose,
}

/// Runs one tick: senses, asks the planner and applies its movement.
pub fn step<P>(world: &mut World, planner: &mut P, out_events: &mut Vec<Event>) -> Movement
where
    P: Planner + ?Sized,
{
    let pose = query::pose(world);
    let reading = query::sensor_reading(world);
    let movement = planner.next_movement(pose.cell, reading);
    world::apply(world, movement, out_events);
    movement
}

/// Driver loop with an overall tick budget.
#[derive(Clone, Copy, Debug)]
pub struct Simulation {
    budget: TickBudget,
}

impl Simulation {
    /// Creates a driver that gives up after `budget` ticks.
    #[must_use]
    pub const fn new(budget: TickBudget) -> Self {
        Self { budget }
    }

    /// Runs the planner until it finishes or the budget is spent.
    pub fn run<P>(&self, world: &mut World, planner: &mut P) -> RunReport
    where
        P: Planner + ?Sized,
    {
        self.run_with(world, planner, |_, _, _| {})
    }

    /// Runs the planner, invoking `observe` after every tick with the updated
    /// world, the movement issued and the events it produced.
    pub fn run_with<P, F>(&self, world: &mut World, planner: &mut P, mut observe: F) -> RunReport
    where
        P: Planner + ?Sized,
        F: FnMut(&World, Movement, &[Event]),
    {
        let mut trace = Vec::new();
        let mut events = Vec::new();

        while query::outcome(world).is_none() && (trace.len() as u64) < self.budget.get() {
            events.clear();
            let movement = step(world, planner, &mut events);
            trace.push(movement);
            observe(world, movement, &events);
        }

        let status = match query::outcome(world) {
            Some(outcome) => {
                info!("run finished with {outcome:?} after {} ticks", trace.len());
                RunStatus::Finished(outcome)
            }
            None => {
                warn!("tick budget of {} exhausted", self.budget.get());
                RunStatus::BudgetExhausted
            }
        };

        RunReport {
            status,
            ticks: trace.len() as u64,
            trace,
            final_pose: query::pose(world),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use micromouse_core::{CellCoord, SensorReading};
    use micromouse_world::Maze;

    struct Spinner;

    impl Planner for Spinner {
        fn next_movement(&mut self, _cell: CellCoord, _reading: SensorReading) -> Movement {
            Movement::RotateClockwise
        }
    }

    struct Quitter;

    impl Planner for Quitter {
        fn next_movement(&mut self, _cell: CellCoord, _reading: SensorReading) -> Movement {
            Movement::Finish(RunOutcome::GaveUp)
        }
    }

    fn open_world(side: u32) -> World {
        World::new(Maze::open(GridSize::new(side).expect("non-empty grid")))
    }

    #[test]
    fn budget_caps_a_planner_that_never_finishes() {
        let mut world = open_world(4);
        let report = Simulation::new(TickBudget::new(10)).run(&mut world, &mut Spinner);

        assert_eq!(report.status, RunStatus::BudgetExhausted);
        assert_eq!(report.ticks, 10);
        assert_eq!(report.final_pose.cell, CellCoord::new(0, 0));
    }

    #[test]
    fn terminal_movement_stops_the_loop() {
        let mut world = open_world(4);
        let mut observed = 0;
        let report = Simulation::new(TickBudget::new(10)).run_with(
            &mut world,
            &mut Quitter,
            |_, movement, events| {
                observed += 1;
                assert_eq!(movement, Movement::Finish(RunOutcome::GaveUp));
                assert_eq!(events.len(), 1);
            },
        );

        assert_eq!(report.status, RunStatus::Finished(RunOutcome::GaveUp));
        assert_eq!(report.ticks, 1);
        assert_eq!(observed, 1);
    }

    #[test]
    fn default_budget_scales_with_area() {
        let size = GridSize::new(4).expect("non-empty grid");
        assert_eq!(TickBudget::for_grid(size).get(), 80);
    }
}
