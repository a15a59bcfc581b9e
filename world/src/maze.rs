//! Ground-truth wall storage for the maze the mouse explores.

use micromouse_core::{CellCoord, GridSize, Heading, WallGrid};

/// Authoritative walls of a square maze. The outer boundary is always closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    walls: WallGrid,
}

impl Maze {
    /// Creates a maze with no internal walls.
    #[must_use]
    pub fn open(size: GridSize) -> Self {
        Self {
            walls: WallGrid::open(size),
        }
    }

    /// Dimensions of the maze.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.walls.size()
    }

    /// Reports whether a wall separates `cell` from its neighbour toward `heading`.
    #[must_use]
    pub fn has_wall(&self, cell: CellCoord, heading: Heading) -> bool {
        self.walls.is_blocked(cell, heading)
    }

    /// Raises a wall between `cell` and its neighbour toward `heading`.
    ///
    /// Returns `false` when the edge lies on the boundary or was already walled.
    pub fn add_wall(&mut self, cell: CellCoord, heading: Heading) -> bool {
        self.walls.block(cell, heading)
    }

    /// Number of internal walls.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.blocked_edges()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_are_shared_by_both_cells() {
        let mut maze = Maze::open(GridSize::new(4).expect("non-empty grid"));
        assert!(maze.add_wall(CellCoord::new(2, 2), Heading::South));

        assert!(maze.has_wall(CellCoord::new(2, 1), Heading::North));
        assert!(!maze.add_wall(CellCoord::new(2, 1), Heading::North));
        assert_eq!(maze.wall_count(), 1);
    }
}
