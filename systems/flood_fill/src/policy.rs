//! Direction policy consulted at every decision tick.

use std::str::FromStr;

use micromouse_core::{CellCoord, Heading};
use thiserror::Error;

use crate::{DistanceField, WallKnowledge};

/// Fixed order in which absolute directions are tried.
///
/// When several neighbours improve on the current distance the first one in
/// this order wins. The order does not depend on the mouse's heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DirectionPriority([Heading; 4]);

impl DirectionPriority {
    /// North, then East, then South, then West.
    pub const NORTH_EAST_SOUTH_WEST: DirectionPriority = DirectionPriority(Heading::ALL);

    /// Creates a priority from an ordering that names every heading once.
    pub fn new(order: [Heading; 4]) -> Result<Self, DirectionPriorityError> {
        for (position, heading) in order.iter().enumerate() {
            if order[..position].contains(heading) {
                return Err(DirectionPriorityError::Duplicate(*heading));
            }
        }

        Ok(Self(order))
    }

    /// Headings in the order they are consulted.
    pub fn iter(&self) -> impl Iterator<Item = Heading> + '_ {
        self.0.iter().copied()
    }
}

impl Default for DirectionPriority {
    fn default() -> Self {
        Self::NORTH_EAST_SOUTH_WEST
    }
}

impl FromStr for DirectionPriority {
    type Err = DirectionPriorityError;

    /// Parses compass letters such as `NESW` or `wsen`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let letters: Vec<char> = value.trim().chars().collect();
        if letters.len() != 4 {
            return Err(DirectionPriorityError::Length(letters.len()));
        }

        let mut order = [Heading::North; 4];
        for (slot, letter) in order.iter_mut().zip(letters) {
            *slot = match letter.to_ascii_uppercase() {
                'N' => Heading::North,
                'E' => Heading::East,
                'S' => Heading::South,
                'W' => Heading::West,
                other => return Err(DirectionPriorityError::UnknownHeading(other)),
            };
        }

        Self::new(order)
    }
}

/// Errors raised while building a [`DirectionPriority`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DirectionPriorityError {
    /// The ordering did not contain exactly four headings.
    #[error("direction priority needs exactly four headings, found {0}")]
    Length(usize),
    /// A letter did not name a compass heading.
    #[error("'{0}' is not one of N, E, S or W")]
    UnknownHeading(char),
    /// A heading appeared more than once.
    #[error("heading {0:?} appears more than once")]
    Duplicate(Heading),
}

/// Picks the first direction, in priority order, whose neighbour is reachable
/// under current knowledge and strictly closer to the goal.
pub(crate) fn choose_direction(
    cell: CellCoord,
    knowledge: &WallKnowledge,
    field: &DistanceField,
    priority: &DirectionPriority,
) -> Option<Heading> {
    let current = field.distance(cell)?;

    priority.iter().find(|&heading| {
        if knowledge.is_blocked(cell, heading) {
            return false;
        }

        cell.step(heading, field.size())
            .and_then(|neighbor| field.distance(neighbor))
            .is_some_and(|distance| distance < current)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use micromouse_core::{GridSize, Pose, SensorReading};

    fn fixtures(side: u32) -> (WallKnowledge, DistanceField) {
        let size = GridSize::new(side).expect("non-empty grid");
        (
            WallKnowledge::seeded(size, Pose::START),
            DistanceField::open_maze(size),
        )
    }

    #[test]
    fn north_wins_ties_regardless_of_heading() {
        let (knowledge, field) = fixtures(4);
        let priority = DirectionPriority::default();

        // (0, 0) improves both northward and eastward.
        assert_eq!(
            choose_direction(CellCoord::new(0, 0), &knowledge, &field, &priority),
            Some(Heading::North)
        );
        // (3, 3) improves southward and westward.
        assert_eq!(
            choose_direction(CellCoord::new(3, 3), &knowledge, &field, &priority),
            Some(Heading::South)
        );
    }

    #[test]
    fn known_walls_are_skipped() {
        let (mut knowledge, field) = fixtures(4);
        let cell = CellCoord::new(0, 0);
        let _ = knowledge.record(
            Pose::new(cell, Heading::North),
            SensorReading {
                ahead: true,
                left: false,
                right: false,
            },
        );

        assert_eq!(
            choose_direction(cell, &knowledge, &field, &DirectionPriority::default()),
            Some(Heading::East)
        );
    }

    #[test]
    fn none_when_no_neighbour_improves() {
        let (knowledge, field) = fixtures(4);
        assert_eq!(
            choose_direction(
                CellCoord::new(1, 1),
                &knowledge,
                &field,
                &DirectionPriority::default()
            ),
            None
        );
    }

    #[test]
    fn custom_priority_changes_tie_break() {
        let (knowledge, field) = fixtures(4);
        let priority: DirectionPriority = "ensw".parse().expect("valid priority");

        assert_eq!(
            choose_direction(CellCoord::new(0, 0), &knowledge, &field, &priority),
            Some(Heading::East)
        );
    }

    #[test]
    fn priority_parsing_rejects_malformed_orders() {
        assert_eq!(
            "NES".parse::<DirectionPriority>(),
            Err(DirectionPriorityError::Length(3))
        );
        assert_eq!(
            "NESX".parse::<DirectionPriority>(),
            Err(DirectionPriorityError::UnknownHeading('X'))
        );
        assert_eq!(
            "NENW".parse::<DirectionPriority>(),
            Err(DirectionPriorityError::Duplicate(Heading::North))
        );
    }
}
