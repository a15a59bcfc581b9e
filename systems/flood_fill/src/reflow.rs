//! Local relaxation that repairs the distance field after new walls appear.

use micromouse_core::{CellCoord, GoalRegion, Heading};

use crate::{DistanceField, WallKnowledge};

/// Result of a single reflow pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reflow {
    /// The field reached a new fixed point after raising `relaxed` cells.
    Settled { relaxed: usize },
    /// Every open neighbour of some cell lies beyond the give-up threshold.
    Unreachable,
}

/// Raises stale distances starting at `seed` until the field is consistent.
///
/// A cell is consistent when its smallest reachable neighbour is strictly
/// closer to the goal than the cell itself. Inconsistent cells are raised to
/// one more than that neighbour and their four grid neighbours are queued
/// again, walls or not. Goal cells, cells with no reachable neighbour and cells
/// already at `u32::MAX` are never touched. The worklist is an explicit stack.
pub(crate) fn reflow(
    seed: CellCoord,
    knowledge: &WallKnowledge,
    field: &mut DistanceField,
    goal: GoalRegion,
    give_up_threshold: u32,
) -> Reflow {
    let size = field.size();
    let mut worklist = vec![seed];
    let mut relaxed = 0;

    while let Some(cell) = worklist.pop() {
        if goal.contains(cell) {
            continue;
        }

        let Some(current) = field.distance(cell) else {
            continue;
        };
        let Some(smallest) = smallest_open_neighbor(cell, knowledge, field) else {
            continue;
        };

        if smallest < current {
            continue;
        }

        if smallest > give_up_threshold {
            return Reflow::Unreachable;
        }

        // A saturated cell cannot rise any further.
        if !field.raise(cell, smallest.saturating_add(1)) {
            continue;
        }
        relaxed += 1;

        worklist.extend(
            Heading::ALL
                .into_iter()
                .filter_map(|heading| cell.step(heading, size)),
        );
    }

    Reflow::Settled { relaxed }
}

fn smallest_open_neighbor(
    cell: CellCoord,
    knowledge: &WallKnowledge,
    field: &DistanceField,
) -> Option<u32> {
    Heading::ALL
        .into_iter()
        .filter(|heading| !knowledge.is_blocked(cell, *heading))
        .filter_map(|heading| cell.step(heading, field.size()))
        .filter_map(|neighbor| field.distance(neighbor))
        .min()
}
