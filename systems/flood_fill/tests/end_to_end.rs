use micromouse_core::{CellCoord, Event, GridSize, Heading, Movement, Pose, RunOutcome};
use micromouse_system_flood_fill::{FloodFill, FloodFillConfig};
use micromouse_system_simulation::{self as simulation, RunStatus, Simulation, TickBudget};
use micromouse_world::{self as world, query, Maze, World};

fn size(side: u32) -> GridSize {
    GridSize::new(side).expect("non-empty grid")
}

fn run_to_end(maze: Maze, budget: u64) -> (simulation::RunReport, FloodFill) {
    let mut planner = FloodFill::new(maze.size());
    let mut world = World::new(maze);
    let report = Simulation::new(TickBudget::new(budget)).run(&mut world, &mut planner);
    (report, planner)
}

#[test]
fn open_maze_reaches_goal_within_area_ticks() {
    let (report, planner) = run_to_end(Maze::open(size(4)), 16);

    assert_eq!(report.status, RunStatus::Finished(RunOutcome::ReachedGoal));
    assert!(report.ticks <= 16, "took {} ticks", report.ticks);
    assert_eq!(
        report.trace,
        vec![
            Movement::Advance,
            Movement::RotateClockwise,
            Movement::Advance,
            Movement::Finish(RunOutcome::ReachedGoal),
        ]
    );
    assert_eq!(report.final_pose.cell, CellCoord::new(1, 1));
    assert_eq!(planner.reflow_count(), 0);
}

#[test]
fn blocked_shortcut_forces_exactly_one_reflow() {
    let mut maze = Maze::open(size(4));
    let _ = maze.add_wall(CellCoord::new(0, 1), Heading::East);
    let mut world = World::new(maze);
    let mut planner = FloodFill::new(size(4));
    let mut events = Vec::new();

    let first = simulation::step(&mut world, &mut planner, &mut events);
    assert_eq!(first, Movement::Advance);
    assert_eq!(planner.reflow_count(), 0);

    // The preferred eastward step into the goal is walled off: the field is
    // repaired once and the very next command is a successful advance.
    let second = simulation::step(&mut world, &mut planner, &mut events);
    assert_eq!(second, Movement::Advance);
    assert_eq!(planner.reflow_count(), 1);
    assert_eq!(query::pose(&world).cell, CellCoord::new(0, 2));

    let mut trace = vec![first, second];
    while query::outcome(&world).is_none() && trace.len() < 16 {
        trace.push(simulation::step(&mut world, &mut planner, &mut events));
    }

    assert_eq!(
        trace,
        vec![
            Movement::Advance,
            Movement::Advance,
            Movement::RotateClockwise,
            Movement::Advance,
            Movement::Finish(RunOutcome::ReachedGoal),
        ]
    );
    assert_eq!(planner.reflow_count(), 1);
    assert_eq!(query::outcome(&world), Some(RunOutcome::ReachedGoal));
}

#[test]
fn odd_maze_reaches_single_centre_cell() {
    let (report, _) = run_to_end(Maze::open(size(5)), 25);

    assert_eq!(report.status, RunStatus::Finished(RunOutcome::ReachedGoal));
    assert_eq!(report.final_pose.cell, CellCoord::new(2, 2));
    assert_eq!(report.ticks, 6);
}

#[test]
fn sealed_goal_gives_up_instead_of_reporting_success() {
    let mut maze = Maze::open(size(4));
    for (cell, heading) in [
        (CellCoord::new(1, 1), Heading::West),
        (CellCoord::new(1, 2), Heading::West),
        (CellCoord::new(2, 1), Heading::East),
        (CellCoord::new(2, 2), Heading::East),
        (CellCoord::new(1, 1), Heading::South),
        (CellCoord::new(2, 1), Heading::South),
        (CellCoord::new(1, 2), Heading::North),
        (CellCoord::new(2, 2), Heading::North),
    ] {
        assert!(maze.add_wall(cell, heading));
    }

    let (report, planner) = run_to_end(maze, 1_000);

    assert_eq!(report.status, RunStatus::Finished(RunOutcome::GaveUp));
    assert_eq!(
        report.trace.last(),
        Some(&Movement::Finish(RunOutcome::GaveUp))
    );
    assert!(planner.reflow_count() > 0);
    assert!(!planner.goal().contains(report.final_pose.cell));
}

#[test]
fn explicit_start_pose_is_honoured() {
    let start = Pose::new(CellCoord::new(0, 0), Heading::East);
    let config = FloodFillConfig {
        start,
        ..FloodFillConfig::default()
    };
    let mut planner = FloodFill::with_config(size(4), config);
    let mut world = World::with_start(Maze::open(size(4)), start).expect("start inside maze");

    let report = Simulation::new(TickBudget::new(16)).run(&mut world, &mut planner);

    assert_eq!(report.status, RunStatus::Finished(RunOutcome::ReachedGoal));
    assert_eq!(report.trace[0], Movement::RotateCounterClockwise);
}

#[test]
fn beliefs_only_grow_during_a_run() {
    let maze = world::parse(
        "
+---+---+---+---+---+
|           |       |
+   +---+   +   +   +
|   |       |   |   |
+   +   +---+   +   +
|   |           |   |
+   +---+---+---+   +
|                   |
+---+   +---+---+   +
|       |           |
+---+---+---+---+---+
",
    )
    .expect("layout parses");
    let mut planner = FloodFill::new(maze.size());
    let mut world = World::new(maze);
    let mut events = Vec::new();

    let mut previous_field = planner.distance_field().clone();
    let mut previous_walls = planner.knowledge().clone();

    for _ in 0..200 {
        if query::outcome(&world).is_some() {
            break;
        }
        let _ = simulation::step(&mut world, &mut planner, &mut events);

        for (after, before) in planner
            .distance_field()
            .cells()
            .iter()
            .zip(previous_field.cells())
        {
            assert!(after >= before, "distance decreased");
        }
        for y in 0..5 {
            for x in 0..5 {
                let cell = CellCoord::new(x, y);
                for heading in Heading::ALL {
                    if previous_walls.is_blocked(cell, heading) {
                        assert!(planner.knowledge().is_blocked(cell, heading));
                    }
                }
            }
        }

        previous_field = planner.distance_field().clone();
        previous_walls = planner.knowledge().clone();
    }

    assert!(query::outcome(&world).is_some(), "run did not finish");
    for cell in planner.goal().cells() {
        assert_eq!(planner.distance_field().distance(cell), Some(0));
    }
}

#[test]
fn advances_are_never_blocked_by_real_walls() {
    let maze = world::parse(include_str!("data/spiral8.txt")).expect("layout parses");
    let mut planner = FloodFill::new(maze.size());
    let mut world = World::new(maze);
    let mut events = Vec::new();

    while query::outcome(&world).is_none() && query::tick_index(&world) < 500 {
        let _ = simulation::step(&mut world, &mut planner, &mut events);
    }

    assert_eq!(query::outcome(&world), Some(RunOutcome::ReachedGoal));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::AdvanceBlocked { .. })));
}
