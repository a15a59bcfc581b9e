#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the micromouse workspace.
//!
//! This crate defines the message surface that connects the authoritative
//! world, the planning systems and the adapters. Each tick the driver captures
//! a [`SensorReading`] through a [`MazeView`], hands it to a [`Planner`]
//! together with the mouse's cell, and applies the returned [`Movement`] to the
//! world, which broadcasts [`Event`] values describing what actually happened.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of the square maze measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize(u32);

impl GridSize {
    /// Creates a validated grid size. A maze must contain at least one cell.
    pub fn new(side: u32) -> Result<Self, GridSizeError> {
        if side == 0 {
            return Err(GridSizeError::Empty);
        }

        Ok(Self(side))
    }

    /// Number of cells along each edge of the maze.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Total number of cells contained in the maze.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let side = usize::try_from(self.0).unwrap_or(0);
        side.saturating_mul(side)
    }

    /// Reports whether the provided cell lies inside the maze.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.x() < self.0 && cell.y() < self.0
    }

    /// Row-major offset of the cell within a dense per-cell buffer.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }

        let side = usize::try_from(self.0).ok()?;
        let x = usize::try_from(cell.x()).ok()?;
        let y = usize::try_from(cell.y()).ok()?;
        y.checked_mul(side)?.checked_add(x)
    }
}

/// Errors raised while validating a grid size.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridSizeError {
    /// The requested maze had no cells.
    #[error("grid size must be at least one cell")]
    Empty,
}

/// Location of a single maze cell. `x` grows eastward and `y` grows northward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the cell, counted from the western edge.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row of the cell, counted from the southern edge.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Neighbouring cell one step toward `heading`, if it lies inside the maze.
    #[must_use]
    pub fn step(self, heading: Heading, size: GridSize) -> Option<CellCoord> {
        let next = match heading {
            Heading::North => CellCoord::new(self.x, self.y.checked_add(1)?),
            Heading::East => CellCoord::new(self.x.checked_add(1)?, self.y),
            Heading::South => CellCoord::new(self.x, self.y.checked_sub(1)?),
            Heading::West => CellCoord::new(self.x.checked_sub(1)?, self.y),
        };

        size.contains(next).then_some(next)
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Absolute facing of the mouse, ordered clockwise starting at North.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Facing toward increasing `y`.
    North,
    /// Facing toward increasing `x`.
    East,
    /// Facing toward decreasing `y`.
    South,
    /// Facing toward decreasing `x`.
    West,
}

impl Heading {
    /// All headings in clockwise order starting at North.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Position of the heading within the clockwise cycle.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Heading reached after `quarter_turns` clockwise rotations.
    #[must_use]
    pub const fn rotated(self, quarter_turns: u8) -> Heading {
        Self::ALL[((self.index() + quarter_turns % 4) % 4) as usize]
    }

    /// Heading 90° clockwise from this one.
    #[must_use]
    pub const fn clockwise(self) -> Heading {
        self.rotated(1)
    }

    /// Heading 90° counter-clockwise from this one.
    #[must_use]
    pub const fn counter_clockwise(self) -> Heading {
        self.rotated(3)
    }

    /// Heading pointing the opposite way.
    #[must_use]
    pub const fn reversed(self) -> Heading {
        self.rotated(2)
    }

    /// Clockwise quarter turns needed to face `target`, normalised to `0..4`.
    #[must_use]
    pub const fn turns_to(self, target: Heading) -> u8 {
        (target.index() + 4 - self.index()) % 4
    }
}

/// Cell and heading occupied by the mouse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pose {
    /// Cell the mouse stands in.
    pub cell: CellCoord,
    /// Absolute direction the mouse faces.
    pub heading: Heading,
}

impl Pose {
    /// Conventional starting pose: the south-west corner, facing North.
    pub const START: Pose = Pose::new(CellCoord::new(0, 0), Heading::North);

    /// Creates a pose from its parts.
    #[must_use]
    pub const fn new(cell: CellCoord, heading: Heading) -> Self {
        Self { cell, heading }
    }
}

/// Geometric centre of the maze that the mouse attempts to reach.
///
/// Odd mazes have a single centre cell. Even mazes use the 2×2 block that
/// surrounds the exact centre point. The region is stored as an inclusive
/// `low..=high` span shared by both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalRegion {
    low: u32,
    high: u32,
}

impl GoalRegion {
    /// Derives the goal region from the maze dimensions.
    #[must_use]
    pub const fn centered(size: GridSize) -> Self {
        let midpoint = size.get() / 2;
        if size.get() % 2 == 0 {
            Self {
                low: midpoint - 1,
                high: midpoint,
            }
        } else {
            Self {
                low: midpoint,
                high: midpoint,
            }
        }
    }

    /// Smallest coordinate covered by the region on either axis.
    #[must_use]
    pub const fn low(&self) -> u32 {
        self.low
    }

    /// Largest coordinate covered by the region on either axis.
    #[must_use]
    pub const fn high(&self) -> u32 {
        self.high
    }

    /// Reports whether the cell belongs to the goal region.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.x() >= self.low
            && cell.x() <= self.high
            && cell.y() >= self.low
            && cell.y() <= self.high
    }

    /// Iterator over the goal cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let (low, high) = (self.low, self.high);
        (low..=high).flat_map(move |y| (low..=high).map(move |x| CellCoord::new(x, y)))
    }
}

/// Dense store of blocked edges between orthogonally adjacent cells.
///
/// Vertical edges separate `(x, y)` from `(x + 1, y)` and horizontal edges
/// separate `(x, y)` from `(x, y + 1)`. The outer boundary is not stored and
/// always reports as blocked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallGrid {
    size: GridSize,
    vertical: Vec<bool>,
    horizontal: Vec<bool>,
}

impl WallGrid {
    /// Creates a grid with every interior edge open.
    #[must_use]
    pub fn open(size: GridSize) -> Self {
        let side = usize::try_from(size.get()).unwrap_or(0);
        let edges = side.saturating_sub(1).saturating_mul(side);
        Self {
            size,
            vertical: vec![false; edges],
            horizontal: vec![false; edges],
        }
    }

    /// Dimensions of the maze the edges belong to.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Reports whether travel from `cell` toward `heading` is blocked.
    ///
    /// Edges on the outer boundary and cells outside the maze are blocked.
    #[must_use]
    pub fn is_blocked(&self, cell: CellCoord, heading: Heading) -> bool {
        match self.slot(cell, heading) {
            Some(EdgeSlot::Vertical(index)) => self.vertical.get(index).copied().unwrap_or(true),
            Some(EdgeSlot::Horizontal(index)) => {
                self.horizontal.get(index).copied().unwrap_or(true)
            }
            None => true,
        }
    }

    /// Marks the edge from `cell` toward `heading` as blocked.
    ///
    /// Returns `true` when the edge was interior and previously open. Boundary
    /// edges are left untouched.
    pub fn block(&mut self, cell: CellCoord, heading: Heading) -> bool {
        let edge = match self.slot(cell, heading) {
            Some(EdgeSlot::Vertical(index)) => self.vertical.get_mut(index),
            Some(EdgeSlot::Horizontal(index)) => self.horizontal.get_mut(index),
            None => None,
        };

        match edge {
            Some(blocked) if !*blocked => {
                *blocked = true;
                true
            }
            _ => false,
        }
    }

    /// Number of interior edges currently blocked.
    #[must_use]
    pub fn blocked_edges(&self) -> usize {
        self.vertical
            .iter()
            .chain(self.horizontal.iter())
            .filter(|blocked| **blocked)
            .count()
    }

    fn slot(&self, cell: CellCoord, heading: Heading) -> Option<EdgeSlot> {
        if !self.size.contains(cell) {
            return None;
        }

        let side = usize::try_from(self.size.get()).ok()?;
        let x = usize::try_from(cell.x()).ok()?;
        let y = usize::try_from(cell.y()).ok()?;
        let last = side - 1;

        match heading {
            Heading::East if x < last => Some(EdgeSlot::Vertical(y * last + x)),
            Heading::West if x > 0 => Some(EdgeSlot::Vertical(y * last + x - 1)),
            Heading::North if y < last => Some(EdgeSlot::Horizontal(y * side + x)),
            Heading::South if y > 0 => Some(EdgeSlot::Horizontal((y - 1) * side + x)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum EdgeSlot {
    Vertical(usize),
    Horizontal(usize),
}

/// Heading-relative wall sensing captured at the mouse's current cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorReading {
    /// Wall directly in front of the mouse.
    pub ahead: bool,
    /// Wall on the mouse's left-hand side.
    pub left: bool,
    /// Wall on the mouse's right-hand side.
    pub right: bool,
}

impl SensorReading {
    /// Samples all three sensors from the provided view.
    #[must_use]
    pub fn capture<V>(view: &V) -> Self
    where
        V: MazeView + ?Sized,
    {
        Self {
            ahead: view.wall_ahead(),
            left: view.wall_on_left(),
            right: view.wall_on_right(),
        }
    }
}

/// Heading-relative view of the walls surrounding the mouse.
pub trait MazeView {
    /// Reports whether a wall blocks the cell directly ahead.
    fn wall_ahead(&self) -> bool;

    /// Reports whether a wall blocks the cell on the left.
    fn wall_on_left(&self) -> bool;

    /// Reports whether a wall blocks the cell on the right.
    fn wall_on_right(&self) -> bool;
}

/// Terminal result of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The mouse stands inside the goal region.
    ReachedGoal,
    /// The planner concluded the goal is unreachable under current knowledge.
    GaveUp,
}

/// Motion commands a planner may issue for a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Movement {
    /// Move one cell along the current heading.
    Advance,
    /// Rotate 90° clockwise in place.
    RotateClockwise,
    /// Rotate 90° counter-clockwise in place.
    RotateCounterClockwise,
    /// Rotate 180° in place.
    RotateAround,
    /// End the run with the provided outcome.
    Finish(RunOutcome),
}

impl Movement {
    /// Command that turns the mouse by `quarter_turns` clockwise rotations.
    ///
    /// Zero turns maps to [`Movement::Advance`] because the mouse already
    /// faces the requested direction.
    #[must_use]
    pub const fn from_quarter_turns(quarter_turns: u8) -> Self {
        match quarter_turns % 4 {
            0 => Self::Advance,
            1 => Self::RotateClockwise,
            2 => Self::RotateAround,
            _ => Self::RotateCounterClockwise,
        }
    }

    /// Clockwise quarter turns applied by a rotation command.
    #[must_use]
    pub const fn rotation(self) -> Option<u8> {
        match self {
            Self::RotateClockwise => Some(1),
            Self::RotateAround => Some(2),
            Self::RotateCounterClockwise => Some(3),
            Self::Advance | Self::Finish(_) => None,
        }
    }
}

/// Events broadcast by the world after applying a movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the mouse moved between two cells.
    MouseAdvanced {
        /// Cell the mouse occupied before moving.
        from: CellCoord,
        /// Cell the mouse occupies after moving.
        to: CellCoord,
    },
    /// Reports that an advance was refused because a wall blocks the way.
    AdvanceBlocked {
        /// Cell the mouse remains in.
        cell: CellCoord,
        /// Heading the mouse attempted to travel toward.
        heading: Heading,
    },
    /// Confirms that the mouse rotated in place.
    MouseRotated {
        /// Heading before the rotation.
        from: Heading,
        /// Heading after the rotation.
        to: Heading,
    },
    /// Announces that the run ended.
    RunFinished {
        /// Cell the mouse occupied when the run ended.
        cell: CellCoord,
        /// Result reported by the planner.
        outcome: RunOutcome,
    },
}

/// Decision-making strategy consulted once per tick.
pub trait Planner {
    /// Chooses the next movement given the mouse's cell and fresh sensor data.
    fn next_movement(&mut self, cell: CellCoord, reading: SensorReading) -> Movement;
}
