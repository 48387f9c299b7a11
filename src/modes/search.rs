use std::fmt;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::game::{Grid, Position};
use crate::search::{PathFinder, SearchTrace};

const DEMO_SIZE: usize = 20;
const DEMO_FROM: Position = Position { row: 6, col: 7 };
const DEMO_TO: Position = Position { row: 14, col: 13 };

/// A single search on the walled demo board
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub longest: bool,
    pub from: Position,
    pub to: Position,
    pub length: usize,
    /// Moves as `^ v < >` symbols
    pub path: String,
    pub visited: usize,
    /// The board with visited cells and the path painted on
    pub board: String,
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        writeln!(
            f,
            "Path from ({}, {}) to ({}, {}) of length {}:",
            self.from.row, self.from.col, self.to.row, self.to.col, self.length
        )?;
        write!(f, "{}", self.path)
    }
}

/// 20x20 board with one vertical and two horizontal wall segments
pub fn demo_grid() -> Result<Grid> {
    let mut grid = Grid::new(DEMO_SIZE, DEMO_SIZE).context("Failed to build the demo board")?;
    for i in 4..16 {
        grid.set_wall(Position::new(i, 9));
        grid.set_wall(Position::new(4, i));
        grid.set_wall(Position::new(15, i));
    }
    Ok(grid)
}

/// Run the shortest (or longest) search across the demo board
pub fn run_demo(longest: bool) -> Result<SearchReport> {
    let mut grid = demo_grid()?;
    let mut finder = PathFinder::with_observer(SearchTrace::new());

    let path = if longest {
        finder.find_max_path(&grid, DEMO_FROM, DEMO_TO, None)
    } else {
        finder.find_min_path(&grid, DEMO_FROM, DEMO_TO, None)
    };
    let trace = finder.into_observer();
    // The last reported path is the result
    trace.paint(&mut grid);

    let report = SearchReport {
        longest,
        from: DEMO_FROM,
        to: DEMO_TO,
        length: path.len(),
        path: path.iter().map(|d| d.symbol()).collect(),
        visited: trace.visited.len(),
        board: grid.to_string(),
    };
    info!(longest, length = report.length, visited = report.visited, "search demo");
    Ok(report)
}

pub fn print_report(report: &SearchReport, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report).context("Failed to encode report")?;
        println!("{text}");
    } else {
        println!("{report}");
    }
    Ok(())
}
