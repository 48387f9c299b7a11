use std::collections::VecDeque;

use super::{Path, PathFinder, SearchObserver};
use crate::game::{Direction, Grid, Position};

impl<O: SearchObserver> PathFinder<O> {
    /// Shortest path from `from` to `to`, as straight as possible.
    ///
    /// Among equally short paths the one that keeps its heading wins: the
    /// neighbour continuing the current direction (or `preferred` on the
    /// first step) is expanded first. Returns an empty path when `to` cannot
    /// be reached or either endpoint lies outside the grid.
    pub fn find_min_path(
        &mut self,
        grid: &Grid,
        from: Position,
        to: Position,
        preferred: Option<Direction>,
    ) -> Path {
        if !grid.is_inside(from) || !grid.is_inside(to) {
            return Path::new();
        }
        let Some(from_index) = grid.index(from) else {
            return Path::new();
        };

        self.scratch.prepare(grid.area());
        self.scratch.reset_distances();
        self.scratch.reach(from_index, 0, None);
        let from_visited = self.scratch.is_visited(from_index);

        let mut open = VecDeque::from([from]);
        while let Some(current) = open.pop_front() {
            self.observer.on_visit(current);

            if current == to {
                let path = self.construct_path(grid, from, to);
                self.observer.on_path(from, &path);
                return path;
            }

            let Some(current_index) = grid.index(current) else {
                continue;
            };
            let heading = if current == from {
                preferred
            } else {
                self.scratch
                    .parent(current_index)
                    .and_then(|parent| parent.direction_to(current))
            };
            let next_distance = self.scratch.distance(current_index).unwrap_or(0) + 1;

            for direction in straight_first(heading) {
                let adjacent = current.adjacent(direction);
                if !grid.is_empty(adjacent) {
                    continue;
                }
                let Some(adjacent_index) = grid.index(adjacent) else {
                    continue;
                };
                if self.scratch.distance(adjacent_index).is_some()
                    || self.scratch.is_visited(adjacent_index)
                {
                    continue;
                }
                // Inside a detour search the direct hop is the edge being
                // replaced, not an answer.
                if current == from && from_visited && adjacent == to {
                    continue;
                }
                self.scratch
                    .reach(adjacent_index, next_distance, Some(current));
                open.push_back(adjacent);
            }
        }

        Path::new()
    }

    /// Follow parent links back from `to`
    fn construct_path(&self, grid: &Grid, from: Position, to: Position) -> Path {
        let mut path = Path::new();
        let mut pos = to;
        while pos != from {
            let Some(parent) = grid.index(pos).and_then(|i| self.scratch.parent(i)) else {
                break;
            };
            if let Some(direction) = parent.direction_to(pos) {
                path.push(direction);
            }
            pos = parent;
        }
        path.reverse();
        path
    }
}

/// Neighbour order with `heading` swapped to the front
fn straight_first(heading: Option<Direction>) -> [Direction; 4] {
    let mut order = Direction::ALL;
    if let Some(i) = heading.and_then(|h| order.iter().position(|&d| d == h)) {
        order.swap(0, i);
    }
    order
}
