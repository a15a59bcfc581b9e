//! Belief store of the walls the mouse has discovered so far.

use micromouse_core::{CellCoord, GridSize, Heading, Pose, SensorReading, WallGrid};

/// Edges the mouse has learned to be blocked.
///
/// Knowledge only ever grows: there is no way to reopen an edge once it has
/// been recorded. Edges that were never sensed are treated as open, which is
/// what lets the distance field start from an optimistic open-maze estimate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallKnowledge {
    walls: WallGrid,
}

impl WallKnowledge {
    /// Creates the initial belief for a mouse starting at `start`.
    ///
    /// The edge directly behind the start pose is recorded as blocked because
    /// the mouse cannot have entered the maze through it.
    #[must_use]
    pub fn seeded(size: GridSize, start: Pose) -> Self {
        let mut walls = WallGrid::open(size);
        let _ = walls.block(start.cell, start.heading.reversed());
        Self { walls }
    }

    /// Reports whether travel from `cell` toward `heading` is known to be blocked.
    #[must_use]
    pub fn is_blocked(&self, cell: CellCoord, heading: Heading) -> bool {
        self.walls.is_blocked(cell, heading)
    }

    /// Folds heading-relative readings taken at `pose` into absolute edges.
    ///
    /// Returns the number of edges learned by this reading. The edge behind
    /// the mouse is never sensed.
    pub fn record(&mut self, pose: Pose, reading: SensorReading) -> usize {
        let sensed = [
            (reading.ahead, pose.heading),
            (reading.left, pose.heading.counter_clockwise()),
            (reading.right, pose.heading.clockwise()),
        ];

        let mut learned = 0;
        for (wall, heading) in sensed {
            if wall && self.walls.block(pose.cell, heading) {
                learned += 1;
            }
        }
        learned
    }

    /// Number of interior edges known to be blocked.
    #[must_use]
    pub fn blocked_edges(&self) -> usize {
        self.walls.blocked_edges()
    }
}
