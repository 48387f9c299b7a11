use crate::game::{Grid, Position};

/// Per-cell working state of a search, indexed by [`Grid::index`].
///
/// Distances and parents are only meaningful inside one search call.
/// `visited` is the exclusion layer the longest-path search uses to carve
/// out cells already on its path; a plain shortest-path call honours it.
#[derive(Debug, Clone, Default)]
pub struct SearchScratch {
    distance: Vec<Option<u32>>,
    parent: Vec<Option<Position>>,
    visited: Vec<bool>,
}

impl SearchScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size the arrays for a grid; a size change discards everything
    pub(crate) fn prepare(&mut self, area: usize) {
        if self.distance.len() != area {
            self.distance = vec![None; area];
            self.parent = vec![None; area];
            self.visited = vec![false; area];
        }
    }

    pub(crate) fn reset_distances(&mut self) {
        self.distance.fill(None);
        self.parent.fill(None);
    }

    pub(crate) fn clear_visited(&mut self) {
        self.visited.fill(false);
    }

    pub fn distance(&self, index: usize) -> Option<u32> {
        self.distance.get(index).copied().flatten()
    }

    pub fn parent(&self, index: usize) -> Option<Position> {
        self.parent.get(index).copied().flatten()
    }

    pub fn is_visited(&self, index: usize) -> bool {
        self.visited.get(index).copied().unwrap_or(false)
    }

    pub(crate) fn set_visited(&mut self, grid: &Grid, pos: Position, visited: bool) {
        if let Some(i) = grid.index(pos) {
            self.visited[i] = visited;
        }
    }

    pub(crate) fn reach(&mut self, index: usize, distance: u32, parent: Option<Position>) {
        self.distance[index] = Some(distance);
        self.parent[index] = parent;
    }
}
