//! Hamiltonian cycle over the free cells of a grid
//!
//! The cycle is built once, before the snake and food are placed, and never
//! changes afterwards. Two builders are available:
//!
//! - [`CycleStrategy::LongestPath`] works on any grid with an even number of
//!   free cells arranged so that a covering path exists. It grows a longest
//!   path between two neighbouring cells and closes it with their shared edge.
//! - [`CycleStrategy::Serpentine`] lays a fixed pattern and only supports an
//!   obstacle-free interior with an even number of rows.

mod covering;
mod serpentine;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SetupError;
use crate::game::{Direction, Grid, Position};

/// How the covering cycle is constructed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum CycleStrategy {
    /// Close a longest path between two adjacent free cells
    #[default]
    LongestPath,
    /// Fixed row-sweeping pattern with a return column
    Serpentine,
}

/// One outgoing direction and one ordinal per covered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HamiltonCycle {
    rows: usize,
    cols: usize,
    steps: Vec<Option<Direction>>,
    ordinals: Vec<Option<usize>>,
    len: usize,
}

impl HamiltonCycle {
    pub fn build(grid: &Grid, strategy: CycleStrategy) -> Result<Self, SetupError> {
        let (steps, start) = match strategy {
            CycleStrategy::LongestPath => covering::build_steps(grid)?,
            CycleStrategy::Serpentine => serpentine::build_steps(grid)?,
        };
        let cycle = Self::from_steps(grid, steps, start)?;
        info!(?strategy, cells = cycle.len, "built covering cycle");
        Ok(cycle)
    }

    /// Number the cells by following `steps` from `start`, checking that the
    /// walk closes after visiting every free cell exactly once
    fn from_steps(
        grid: &Grid,
        steps: Vec<Option<Direction>>,
        start: Position,
    ) -> Result<Self, SetupError> {
        let free = grid.free_cell_count();
        let mut ordinals = vec![None; grid.area()];
        let mut pos = start;
        let mut covered = 0;

        while let Some(index) = grid.index(pos).filter(|_| grid.is_inside(pos)) {
            if ordinals[index].is_some() {
                break;
            }
            ordinals[index] = Some(covered);
            covered += 1;
            match steps[index] {
                Some(direction) => pos = pos.adjacent(direction),
                None => break,
            }
        }

        if pos != start || covered != free {
            return Err(SetupError::InfeasibleCovering { covered, free });
        }

        Ok(Self {
            rows: grid.rows(),
            cols: grid.cols(),
            steps,
            ordinals,
            len: covered,
        })
    }

    /// Number of cells on the cycle
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row < 0 || pos.col < 0 {
            return None;
        }
        let (row, col) = (pos.row as usize, pos.col as usize);
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// Outgoing direction of the cycle at `pos`
    pub fn step(&self, pos: Position) -> Option<Direction> {
        self.index(pos).and_then(|i| self.steps[i])
    }

    /// Position of `pos` along the cycle, `0..len`
    pub fn ordinal(&self, pos: Position) -> Option<usize> {
        self.index(pos).and_then(|i| self.ordinals[i])
    }

    /// The cell that follows `pos` on the cycle
    pub fn next(&self, pos: Position) -> Option<Position> {
        self.step(pos).map(|d| pos.adjacent(d))
    }

    /// Distance from `anchor` to `pos` walking forward along the cycle.
    ///
    /// Only meaningful for comparing several positions against the same
    /// anchor.
    pub fn location(&self, anchor: Position, pos: Position) -> Option<usize> {
        let anchor = self.ordinal(anchor)?;
        let pos = self.ordinal(pos)?;
        Some((pos + self.len - anchor) % self.len)
    }

    /// One full lap starting at `start`
    pub fn cells_from(&self, start: Position) -> impl Iterator<Item = Position> + '_ {
        let len = if self.ordinal(start).is_some() { self.len } else { 0 };
        std::iter::successors(Some(start), move |&pos| self.next(pos)).take(len)
    }

    /// The cell holding ordinal `ordinal`
    pub fn position_at(&self, ordinal: usize) -> Option<Position> {
        let index = self.ordinals.iter().position(|&o| o == Some(ordinal))?;
        Some(Position::new(
            (index / self.cols) as i32,
            (index % self.cols) as i32,
        ))
    }
}

impl fmt::Display for HamiltonCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.steps.chunks(self.cols) {
            for step in row {
                write!(f, "{}", step.map_or('#', |d| d.symbol()))?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        for row in self.ordinals.chunks(self.cols) {
            for ordinal in row {
                match ordinal {
                    Some(o) => write!(f, "{o:>4}")?,
                    None => write!(f, "   #")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "max: {}", self.len)
    }
}
