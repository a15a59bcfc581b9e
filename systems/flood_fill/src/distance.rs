//! Distance field describing the believed hop count to the goal region.

use micromouse_core::{CellCoord, GoalRegion, GridSize};

/// Dense per-cell estimate of the remaining hops to the nearest goal cell.
///
/// The field starts from the open-maze Manhattan distance and is only ever
/// raised afterwards, so every entry stays a lower bound on the true distance
/// under full wall knowledge. Goal cells hold zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    size: GridSize,
    values: Vec<u32>,
}

impl DistanceField {
    /// Builds the field for a maze whose internal walls are all unknown.
    ///
    /// The open-maze distance is symmetric about the centre, so each quadrant
    /// offset `(i, j)` is written to the four mirrored cells at once. Odd mazes
    /// share their centre row and column between quadrants.
    #[must_use]
    pub fn open_maze(size: GridSize) -> Self {
        let goal = GoalRegion::centered(size);
        let mut field = Self {
            size,
            values: vec![0; size.cell_count()],
        };

        let (low, high) = (goal.low(), goal.high());
        for i in 0..=low {
            for j in 0..=low {
                let distance = i + j;
                for x in [low - i, high + i] {
                    for y in [low - j, high + j] {
                        field.write(CellCoord::new(x, y), distance);
                    }
                }
            }
        }

        field
    }

    /// Dimensions of the maze the field covers.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Believed distance from `cell` to the goal, if the cell is inside the maze.
    #[must_use]
    pub fn distance(&self, cell: CellCoord) -> Option<u32> {
        self.size
            .index(cell)
            .and_then(|index| self.values.get(index).copied())
    }

    /// Dense distances stored in row-major order, southern row first.
    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.values
    }

    /// Raises the distance at `cell` to `value`. Lower values are ignored.
    pub(crate) fn raise(&mut self, cell: CellCoord, value: u32) -> bool {
        let Some(slot) = self
            .size
            .index(cell)
            .and_then(|index| self.values.get_mut(index))
        else {
            return false;
        };

        if value <= *slot {
            return false;
        }

        *slot = value;
        true
    }

    fn write(&mut self, cell: CellCoord, value: u32) {
        if let Some(slot) = self
            .size
            .index(cell)
            .and_then(|index| self.values.get_mut(index))
        {
            *slot = value;
        }
    }
}
