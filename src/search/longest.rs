use tracing::debug;

use super::{walk, Path, PathFinder, SearchObserver};
use crate::game::{Direction, Grid, Position};

impl<O: SearchObserver> PathFinder<O> {
    /// A long simple path from `from` to `to`.
    ///
    /// Starts from the shortest path, then repeatedly walks its edges and
    /// replaces any edge `(u, v)` by a detour from `u` to `v` through cells
    /// not yet on the path. Stops after a pass that adds nothing. Each pass
    /// grows the path by at least two cells or ends the loop, so there are
    /// at most as many passes as free cells.
    pub fn find_max_path(
        &mut self,
        grid: &Grid,
        from: Position,
        to: Position,
        preferred: Option<Direction>,
    ) -> Path {
        if !grid.is_inside(from) || !grid.is_inside(to) {
            return Path::new();
        }
        self.scratch.prepare(grid.area());
        self.scratch.clear_visited();

        let mut path = self.find_min_path(grid, from, to, preferred);
        if path.is_empty() {
            return path;
        }

        let mut passes = 0usize;
        loop {
            let size = path.len();
            passes += 1;
            self.splice_detours(grid, from, &mut path);
            self.observer.on_path(from, &path);
            if path.len() <= size {
                break;
            }
        }
        debug!(passes, len = path.len(), "longest path settled");

        self.scratch.clear_visited();
        path
    }

    /// One augmentation pass over every edge of `path`
    fn splice_detours(&mut self, grid: &Grid, from: Position, path: &mut Path) {
        for cell in walk(from, path) {
            self.scratch.set_visited(grid, cell, true);
        }

        let mut first = from;
        let mut i = 0;
        while i < path.len() {
            let direction = path[i];
            let second = first.adjacent(direction);

            self.scratch.set_visited(grid, second, false);
            let detour = self.find_min_path(grid, first, second, Some(direction));
            self.scratch.set_visited(grid, second, true);

            if detour.len() > 1 {
                for cell in walk(first, &detour) {
                    self.scratch.set_visited(grid, cell, true);
                }
                let spliced = detour.len();
                path.splice(i..=i, detour);
                i += spliced;
            } else {
                i += 1;
            }
            first = second;
        }
    }
}
