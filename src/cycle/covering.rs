use tracing::debug;

use crate::error::SetupError;
use crate::game::{Direction, Grid, Position};
use crate::search::{walk, PathFinder};

/// Steps of a cycle obtained by closing a longest path between two
/// neighbouring free cells. Returns the steps and the cell holding ordinal 0.
pub(super) fn build_steps(grid: &Grid) -> Result<(Vec<Option<Direction>>, Position), SetupError> {
    let (first, second) = seed_pair(grid).ok_or(SetupError::NoAdjacentFreeCells)?;
    debug!(?first, ?second, "seeding covering path");

    let mut finder = PathFinder::new();
    let path = finder.find_max_path(grid, first, second, second.direction_to(first));

    let free = grid.free_cell_count();
    if path.len() + 1 != free {
        let covered = if path.is_empty() { 0 } else { path.len() + 1 };
        return Err(SetupError::InfeasibleCovering { covered, free });
    }

    let mut steps = vec![None; grid.area()];
    let cells = walk(first, &path);
    for (cell, &direction) in cells.iter().zip(&path) {
        if let Some(i) = grid.index(*cell) {
            steps[i] = Some(direction);
        }
    }
    // Close the loop over the seed edge
    if let Some(i) = grid.index(second) {
        steps[i] = second.direction_to(first);
    }

    Ok((steps, first))
}

/// The first two empty cells if they touch, otherwise the first empty cell
/// (row-major) that has an empty neighbour, paired with that neighbour
pub(super) fn seed_pair(grid: &Grid) -> Option<(Position, Position)> {
    let empty = grid.empty_points();
    if let [a, b, ..] = empty[..] {
        if a.direction_to(b).is_some() {
            return Some((a, b));
        }
    }
    empty.iter().find_map(|&p| {
        Direction::ALL
            .into_iter()
            .map(|d| p.adjacent(d))
            .find(|&n| grid.is_empty(n))
            .map(|n| (p, n))
    })
}
