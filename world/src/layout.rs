//! ASCII maze layouts.
//!
//! A maze of side `n` is drawn on `2n + 1` lines, northern edge first. Posts
//! (`+`) sit on even columns that are multiples of four; a `|` between two
//! cells marks a wall on a cell line and `---` marks a wall on a separator
//! line. Every line is `4n + 1` characters wide once trailing spaces are
//! trimmed. Only interior walls are read; the outer boundary is always closed.

use micromouse_core::{CellCoord, GoalRegion, GridSize, Heading, Pose};
use thiserror::Error;

use crate::Maze;

const CELL_WIDTH: usize = 4;

/// Errors raised while reading an ASCII maze layout.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout contained no drawing.
    #[error("maze layout is empty")]
    Empty,
    /// A layout needs an odd number of lines: `2n + 1` for a maze of side `n`.
    #[error("maze layout has {0} lines; expected an odd count of at least 3")]
    LineCount(usize),
    /// The maze side does not fit the supported coordinate range.
    #[error("maze side {0} is too large")]
    TooLarge(usize),
    /// A line's width does not match the maze side implied by the line count.
    #[error("line {line} is {width} characters wide; a {side}x{side} maze needs {expected}")]
    LineWidth {
        /// One-based line number within the trimmed layout.
        line: usize,
        /// Width of the offending line.
        width: usize,
        /// Width every line of a maze this size must have.
        expected: usize,
        /// Maze side implied by the line count.
        side: usize,
    },
}

/// Parses an ASCII layout into a maze.
pub fn parse(layout: &str) -> Result<Maze, LayoutError> {
    let lines: Vec<Vec<char>> = layout
        .lines()
        .map(|line| line.trim_end().chars().collect())
        .collect();
    let first = lines
        .iter()
        .position(|line| !line.is_empty())
        .ok_or(LayoutError::Empty)?;
    let last = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .ok_or(LayoutError::Empty)?;
    let lines = &lines[first..=last];

    if lines.len() < 3 || lines.len() % 2 == 0 {
        return Err(LayoutError::LineCount(lines.len()));
    }

    let side = (lines.len() - 1) / 2;
    let expected = side * CELL_WIDTH + 1;
    if let Some((index, line)) = lines
        .iter()
        .enumerate()
        .find(|(_, line)| line.len() != expected)
    {
        return Err(LayoutError::LineWidth {
            line: index + 1,
            width: line.len(),
            expected,
            side,
        });
    }

    let size = u32::try_from(side)
        .ok()
        .and_then(|side| GridSize::new(side).ok())
        .ok_or(LayoutError::TooLarge(side))?;
    let mut maze = Maze::open(size);
    let glyph = |line: usize, column: usize| lines[line][column];

    for (y, row) in (0..size.get()).zip((0..side).rev()) {
        let cell_line = 2 * row + 1;
        let separator_line = 2 * row;

        for (x, column) in (0..size.get()).zip(0..side) {
            let cell = CellCoord::new(x, y);

            if column + 1 < side && glyph(cell_line, (column + 1) * CELL_WIDTH) == '|' {
                let _ = maze.add_wall(cell, Heading::East);
            }

            if row > 0 && glyph(separator_line, column * CELL_WIDTH + 2) == '-' {
                let _ = maze.add_wall(cell, Heading::North);
            }
        }
    }

    Ok(maze)
}

/// Draws the maze with goal cells marked `G` and the mouse drawn by heading.
#[must_use]
pub fn render(maze: &Maze, goal: GoalRegion, mouse: Pose) -> String {
    let side = maze.size().get();
    let mut out = String::new();

    for y in (0..side).rev() {
        push_separator(&mut out, side, |x| {
            y + 1 == side || maze.has_wall(CellCoord::new(x, y), Heading::North)
        });

        out.push('|');
        for x in 0..side {
            let cell = CellCoord::new(x, y);
            out.push_str(cell_glyph(cell, goal, mouse));
            out.push(if maze.has_wall(cell, Heading::East) {
                '|'
            } else {
                ' '
            });
        }
        out.push('\n');
    }

    push_separator(&mut out, side, |_| true);
    out
}

fn push_separator<F>(out: &mut String, side: u32, mut walled: F)
where
    F: FnMut(u32) -> bool,
{
    out.push('+');
    for x in 0..side {
        out.push_str(if walled(x) { "---" } else { "   " });
        out.push('+');
    }
    out.push('\n');
}

fn cell_glyph(cell: CellCoord, goal: GoalRegion, mouse: Pose) -> &'static str {
    if cell == mouse.cell {
        return match mouse.heading {
            Heading::North => " ^ ",
            Heading::East => " > ",
            Heading::South => " v ",
            Heading::West => " < ",
        };
    }

    if goal.contains(cell) {
        " G "
    } else {
        "   "
    }
}
