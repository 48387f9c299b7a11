//! Grid path searches
//!
//! Both searches run over cells for which [`Grid::is_empty`] holds, so a goal
//! cell carrying food or a snake segment must be unmasked by the caller for
//! the duration of the call (see [`Navigator::path_to`](crate::ai::Navigator::path_to)).
//!
//! - [`PathFinder::find_min_path`]: breadth-first, prefers going straight
//! - [`PathFinder::find_max_path`]: lengthens a shortest path by splicing in
//!   detours until no edge can be replaced

mod longest;
mod observer;
mod scratch;
mod shortest;

pub use observer::{SearchObserver, SearchTrace};
pub use scratch::SearchScratch;

use crate::game::{Direction, Position};

/// A route as the sequence of moves from its start cell
pub type Path = Vec<Direction>;

/// Cells visited when replaying `path` from `from`, `from` included
pub fn walk(from: Position, path: &[Direction]) -> Vec<Position> {
    let mut cells = Vec::with_capacity(path.len() + 1);
    let mut pos = from;
    cells.push(pos);
    for &direction in path {
        pos = pos.adjacent(direction);
        cells.push(pos);
    }
    cells
}

/// Owns the scratch space of the searches; `&mut self` on every search
/// keeps one search in flight at a time.
#[derive(Debug, Default)]
pub struct PathFinder<O = ()> {
    scratch: SearchScratch,
    observer: O,
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: SearchObserver> PathFinder<O> {
    pub fn with_observer(observer: O) -> Self {
        Self {
            scratch: SearchScratch::new(),
            observer,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Working state left behind by the last search
    pub fn scratch(&self) -> &SearchScratch {
        &self.scratch
    }
}
