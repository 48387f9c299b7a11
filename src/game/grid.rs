use std::fmt;

use super::action::Direction;
use super::state::Position;
use crate::error::SetupError;

/// Smallest accepted grid dimension, boundary walls included
pub const MIN_GRID_SIZE: usize = 4;

/// Content of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    Empty,
    Wall,
    Food,
    Head,
    Body,
    Tail,
    /// Debug overlay: cell expanded by a search
    VisitMark,
    /// Debug overlay: cell on a reported path
    PathMark,
}

impl CellType {
    pub fn is_snake(&self) -> bool {
        matches!(self, CellType::Head | CellType::Body | CellType::Tail)
    }

    pub fn is_mark(&self) -> bool {
        matches!(self, CellType::VisitMark | CellType::PathMark)
    }

    /// Two-character glyph used by the movement log
    pub fn glyph(&self) -> &'static str {
        match self {
            CellType::Empty => "  ",
            CellType::Wall => "# ",
            CellType::Food => "F ",
            CellType::Head => "H ",
            CellType::Body => "B ",
            CellType::Tail => "T ",
            CellType::VisitMark => ". ",
            CellType::PathMark => "* ",
        }
    }
}

/// The game map: a rectangle of cells whose outer ring is always wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellType>,
    food: Option<Position>,
}

impl Grid {
    /// Create a grid of `rows` x `cols` cells including the boundary walls
    pub fn new(rows: usize, cols: usize) -> Result<Self, SetupError> {
        if rows < MIN_GRID_SIZE || cols < MIN_GRID_SIZE {
            return Err(SetupError::GridTooSmall { rows, cols });
        }

        let mut cells = vec![CellType::Empty; rows * cols];
        for row in 0..rows {
            for col in 0..cols {
                if row == 0 || row == rows - 1 || col == 0 || col == cols - 1 {
                    cells[row * cols + col] = CellType::Wall;
                }
            }
        }

        Ok(Self {
            rows,
            cols,
            cells,
            food: None,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, walls included
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Flat index of a position, `None` outside the array
    pub fn index(&self, pos: Position) -> Option<usize> {
        if pos.row < 0 || pos.col < 0 {
            return None;
        }
        let (row, col) = (pos.row as usize, pos.col as usize);
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::new((index / self.cols) as i32, (index % self.cols) as i32)
    }

    pub fn cell(&self, pos: Position) -> Option<CellType> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Overwrite a cell; positions outside the array are ignored
    pub fn set_cell(&mut self, pos: Position, cell: CellType) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Turn an interior cell into an obstacle
    pub fn set_wall(&mut self, pos: Position) {
        if self.is_inside(pos) {
            self.set_cell(pos, CellType::Wall);
        }
    }

    /// True iff `pos` lies strictly within the outer wall ring
    pub fn is_inside(&self, pos: Position) -> bool {
        pos.row > 0
            && pos.col > 0
            && pos.row < self.rows as i32 - 1
            && pos.col < self.cols as i32 - 1
    }

    /// True iff the snake may step onto `pos`
    pub fn is_safe(&self, pos: Position) -> bool {
        self.is_inside(pos)
            && matches!(self.cell(pos), Some(CellType::Empty) | Some(CellType::Food))
    }

    /// True iff `pos` is searchable: empty or carrying a debug overlay
    pub fn is_empty(&self, pos: Position) -> bool {
        self.is_inside(pos)
            && matches!(self.cell(pos), Some(c) if c == CellType::Empty || c.is_mark())
    }

    pub fn is_head(&self, pos: Position) -> bool {
        self.is_inside(pos) && self.cell(pos) == Some(CellType::Head)
    }

    pub fn is_tail(&self, pos: Position) -> bool {
        self.is_inside(pos) && self.cell(pos) == Some(CellType::Tail)
    }

    /// Every interior cell is occupied by the snake (the win condition)
    pub fn is_all_body(&self) -> bool {
        self.interior_points()
            .all(|p| self.cell(p).is_some_and(|c| c.is_snake()))
    }

    /// Interior positions in row-major order
    pub fn interior_points(&self) -> impl Iterator<Item = Position> + '_ {
        let (rows, cols) = (self.rows as i32, self.cols as i32);
        (1..rows - 1).flat_map(move |row| (1..cols - 1).map(move |col| Position::new(row, col)))
    }

    /// All `Empty` interior cells, row-major
    pub fn empty_points(&self) -> Vec<Position> {
        self.interior_points()
            .filter(|&p| self.cell(p) == Some(CellType::Empty))
            .collect()
    }

    /// Interior cells that are not walls
    pub fn free_cell_count(&self) -> usize {
        self.interior_points()
            .filter(|&p| self.cell(p) != Some(CellType::Wall))
            .count()
    }

    /// Place food at `pos`.
    ///
    /// A previous food position is forgotten but its cell is left as is;
    /// callers remove the old food first.
    pub fn create_food(&mut self, pos: Position) {
        self.food = Some(pos);
        self.set_cell(pos, CellType::Food);
    }

    pub fn remove_food(&mut self) {
        if let Some(food) = self.food.take() {
            self.set_cell(food, CellType::Empty);
        }
    }

    pub fn has_food(&self) -> bool {
        self.food.is_some()
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    /// Manhattan distance between two positions
    pub fn estimate_dist(from: Position, to: Position) -> i32 {
        from.manhattan_distance(to)
    }

    /// Overlay `PathMark` on the empty cells along `path` starting at `from`
    pub fn mark_path(&mut self, from: Position, path: &[Direction]) {
        let mut pos = from;
        self.mark_path_cell(pos);
        for &direction in path {
            pos = pos.adjacent(direction);
            self.mark_path_cell(pos);
        }
    }

    fn mark_path_cell(&mut self, pos: Position) {
        if self.is_empty(pos) {
            self.set_cell(pos, CellType::PathMark);
        }
    }

    pub fn mark_visited(&mut self, pos: Position) {
        if self.cell(pos) == Some(CellType::Empty) && self.is_inside(pos) {
            self.set_cell(pos, CellType::VisitMark);
        }
    }

    /// Remove every debug overlay
    pub fn clear_marks(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.is_mark()) {
            *cell = CellType::Empty;
        }
    }

    /// Rows of cells, top to bottom
    pub fn rows_iter(&self) -> impl Iterator<Item = &[CellType]> {
        self.cells.chunks(self.cols)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            for cell in row {
                f.write_str(cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
