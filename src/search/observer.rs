use tracing::trace;

use crate::game::{Direction, Grid, Position};

/// Hook into the progress of a search, for visualising or pacing it.
///
/// The unit type is the no-op observer used by the autopilot.
pub trait SearchObserver {
    /// A cell was taken off the open list
    fn on_visit(&mut self, _pos: Position) {}

    /// A search produced `path` starting at `from`
    fn on_path(&mut self, _from: Position, _path: &[Direction]) {}
}

impl SearchObserver for () {}

/// Records every visited cell and reported path, and emits them as
/// `trace!` events.
#[derive(Debug, Clone, Default)]
pub struct SearchTrace {
    pub visited: Vec<Position>,
    pub paths: Vec<(Position, Vec<Direction>)>,
}

impl SearchTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay the recorded search onto a grid: visit marks first, then the
    /// last reported path on top
    pub fn paint(&self, grid: &mut Grid) {
        for &pos in &self.visited {
            grid.mark_visited(pos);
        }
        if let Some((from, path)) = self.paths.last() {
            grid.mark_path(*from, path);
        }
    }
}

impl SearchObserver for SearchTrace {
    fn on_visit(&mut self, pos: Position) {
        trace!(row = pos.row, col = pos.col, "search visit");
        self.visited.push(pos);
    }

    fn on_path(&mut self, from: Position, path: &[Direction]) {
        trace!(row = from.row, col = from.col, len = path.len(), "search path");
        self.paths.push((from, path.to_vec()));
    }
}
