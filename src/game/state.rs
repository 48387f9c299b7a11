use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::grid::{CellType, Grid};
use crate::error::SetupError;

/// A cell coordinate on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Sentinel that is never inside any grid
    pub const INVALID: Position = Position { row: -1, col: -1 };

    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// The neighbouring position in a direction
    pub fn adjacent(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }

    /// Direction leading from `self` to `other`, if they are cardinal neighbours
    pub fn direction_to(&self, other: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.adjacent(d) == other)
    }

    pub fn manhattan_distance(&self, other: Position) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// What a single call to [`Snake::advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No direction set, or the snake is already dead
    Idle,
    Moved,
    /// Moved onto the food and grew by one
    Ate,
    Collided(CollisionType),
}

/// The snake: body segments head-first, mirrored into the grid's cell types.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snake {
    body: VecDeque<Position>,
    /// Pending direction applied by the next [`Snake::advance`]
    pub direction: Option<Direction>,
    dead: bool,
}

impl Snake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snake from segments listed head first
    pub fn spawn(grid: &mut Grid, segments: &[Position]) -> Result<Self, SetupError> {
        let mut snake = Self::new();
        for &pos in segments {
            snake.add_body(grid, pos)?;
        }
        Ok(snake)
    }

    /// Append a segment behind the current tail
    pub fn add_body(&mut self, grid: &mut Grid, pos: Position) -> Result<(), SetupError> {
        if !grid.is_inside(pos) {
            return Err(SetupError::InvalidSpawn(pos));
        }
        if self.body.is_empty() {
            grid.set_cell(pos, CellType::Head);
        } else {
            if self.body.len() > 1 {
                grid.set_cell(self.tail(), CellType::Body);
            }
            grid.set_cell(pos, CellType::Tail);
        }
        self.body.push_back(pos);
        Ok(())
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body.front().copied().unwrap_or(Position::INVALID)
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or(Position::INVALID)
    }

    pub fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Advance one cell in the pending direction, updating the grid.
    ///
    /// The head may enter the cell the tail leaves in the same move; it may
    /// not when the move eats food, since the tail then stays put.
    pub fn advance(&mut self, grid: &mut Grid) -> MoveOutcome {
        let Some(direction) = self.direction else {
            return MoveOutcome::Idle;
        };
        if self.dead || self.body.is_empty() {
            return MoveOutcome::Idle;
        }

        let head = self.head();
        let new_head = head.adjacent(direction);
        let chasing_tail = self.body.len() > 2 && new_head == self.tail();

        if !grid.is_safe(new_head) && !chasing_tail {
            self.dead = true;
            let collision = match grid.cell(new_head) {
                Some(cell) if cell.is_snake() => CollisionType::SelfCollision,
                _ => CollisionType::Wall,
            };
            return MoveOutcome::Collided(collision);
        }

        let ate = grid.cell(new_head) == Some(CellType::Food);
        grid.set_cell(head, CellType::Body);
        if ate {
            grid.remove_food();
        } else if let Some(old_tail) = self.body.pop_back() {
            grid.set_cell(old_tail, CellType::Empty);
        }

        self.body.push_front(new_head);
        grid.set_cell(new_head, CellType::Head);
        if self.body.len() > 1 {
            grid.set_cell(self.tail(), CellType::Tail);
        }

        if ate {
            MoveOutcome::Ate
        } else {
            MoveOutcome::Moved
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check if position is covered by the snake
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    pub score: u32,
    pub steps: u32,
    pub is_alive: bool,
    pub won: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(grid: Grid, snake: Snake) -> Self {
        Self {
            grid,
            snake,
            score: 0,
            steps: 0,
            is_alive: true,
            won: false,
        }
    }

    pub fn is_over(&self) -> bool {
        !self.is_alive || self.won
    }

    pub fn food(&self) -> Option<Position> {
        self.grid.food()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_snake(grid: &mut Grid) -> Snake {
        Snake::spawn(
            grid,
            &[Position::new(1, 3), Position::new(1, 2), Position::new(1, 1)],
        )
        .unwrap()
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.adjacent(Direction::Up), Position::new(4, 5));
        assert_eq!(pos.adjacent(Direction::Down), Position::new(6, 5));
        assert_eq!(pos.adjacent(Direction::Left), Position::new(5, 4));
        assert_eq!(pos.adjacent(Direction::Right), Position::new(5, 6));
    }

    #[test]
    fn test_direction_to_neighbours_only() {
        let pos = Position::new(3, 3);
        assert_eq!(pos.direction_to(Position::new(2, 3)), Some(Direction::Up));
        assert_eq!(pos.direction_to(Position::new(3, 4)), Some(Direction::Right));
        assert_eq!(pos.direction_to(Position::new(4, 4)), None);
        assert_eq!(pos.direction_to(pos), None);
        assert_eq!(pos.direction_to(Position::new(3, 5)), None);
    }

    #[test]
    fn test_spawn_types_cells() {
        let mut grid = Grid::new(6, 6).unwrap();
        let snake = row_snake(&mut grid);

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(1, 3));
        assert_eq!(snake.tail(), Position::new(1, 1));
        assert_eq!(grid.cell(Position::new(1, 3)), Some(CellType::Head));
        assert_eq!(grid.cell(Position::new(1, 2)), Some(CellType::Body));
        assert_eq!(grid.cell(Position::new(1, 1)), Some(CellType::Tail));
    }

    #[test]
    fn test_single_segment_is_head() {
        let mut grid = Grid::new(6, 6).unwrap();
        let snake = Snake::spawn(&mut grid, &[Position::new(2, 2)]).unwrap();
        assert_eq!(snake.head(), snake.tail());
        assert_eq!(grid.cell(Position::new(2, 2)), Some(CellType::Head));
    }

    #[test]
    fn test_spawn_on_wall_fails() {
        let mut grid = Grid::new(6, 6).unwrap();
        let result = Snake::spawn(&mut grid, &[Position::new(0, 2)]);
        assert_eq!(result, Err(SetupError::InvalidSpawn(Position::new(0, 2))));
    }

    #[test]
    fn test_idle_without_direction() {
        let mut grid = Grid::new(6, 6).unwrap();
        let mut snake = row_snake(&mut grid);
        assert_eq!(snake.advance(&mut grid), MoveOutcome::Idle);
        assert_eq!(snake.head(), Position::new(1, 3));
    }

    #[test]
    fn test_snake_movement() {
        let mut grid = Grid::new(6, 6).unwrap();
        let mut snake = row_snake(&mut grid);

        snake.direction = Some(Direction::Down);
        assert_eq!(snake.advance(&mut grid), MoveOutcome::Moved);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(2, 3));
        assert_eq!(snake.tail(), Position::new(1, 2));
        assert_eq!(grid.cell(Position::new(2, 3)), Some(CellType::Head));
        assert_eq!(grid.cell(Position::new(1, 3)), Some(CellType::Body));
        assert_eq!(grid.cell(Position::new(1, 2)), Some(CellType::Tail));
        assert_eq!(grid.cell(Position::new(1, 1)), Some(CellType::Empty));
    }

    #[test]
    fn test_eating_grows() {
        let mut grid = Grid::new(6, 6).unwrap();
        let mut snake = row_snake(&mut grid);
        grid.create_food(Position::new(1, 4));

        snake.direction = Some(Direction::Right);
        assert_eq!(snake.advance(&mut grid), MoveOutcome::Ate);
        assert_eq!(snake.len(), 4);
        assert!(!grid.has_food());
        assert_eq!(snake.tail(), Position::new(1, 1));
        assert_eq!(grid.cell(Position::new(1, 4)), Some(CellType::Head));
    }

    #[test]
    fn test_single_segment_growth_sets_tail() {
        let mut grid = Grid::new(6, 6).unwrap();
        let mut snake = Snake::spawn(&mut grid, &[Position::new(2, 2)]).unwrap();
        grid.create_food(Position::new(2, 3));

        snake.direction = Some(Direction::Right);
        assert_eq!(snake.advance(&mut grid), MoveOutcome::Ate);
        assert_eq!(grid.cell(Position::new(2, 3)), Some(CellType::Head));
        assert_eq!(grid.cell(Position::new(2, 2)), Some(CellType::Tail));
    }

    #[test]
    fn test_wall_collision() {
        let mut grid = Grid::new(6, 6).unwrap();
        let mut snake = row_snake(&mut grid);

        snake.direction = Some(Direction::Up);
        assert_eq!(
            snake.advance(&mut grid),
            MoveOutcome::Collided(CollisionType::Wall)
        );
        assert!(snake.is_dead());
        assert_eq!(snake.advance(&mut grid), MoveOutcome::Idle);
    }

    #[test]
    fn test_self_collision() {
        let mut grid = Grid::new(8, 8).unwrap();
        let mut snake = Snake::spawn(
            &mut grid,
            &[
                Position::new(2, 2),
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
                Position::new(3, 1),
            ],
        )
        .unwrap();

        snake.direction = Some(Direction::Down);
        assert_eq!(
            snake.advance(&mut grid),
            MoveOutcome::Collided(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_game_state_over() {
        let mut grid = Grid::new(6, 6).unwrap();
        let snake = row_snake(&mut grid);
        let mut state = GameState::new(grid, snake);
        assert!(!state.is_over());
        assert_eq!(state.food(), None);

        state.won = true;
        assert!(state.is_over());
    }

    #[test]
    fn test_head_may_follow_vacating_tail() {
        let mut grid = Grid::new(6, 6).unwrap();
        // A 2x2 ring: head (1,1), then (1,2), (2,2), tail (2,1)
        let mut snake = Snake::spawn(
            &mut grid,
            &[
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(2, 1),
            ],
        )
        .unwrap();

        snake.direction = Some(Direction::Down);
        assert_eq!(snake.advance(&mut grid), MoveOutcome::Moved);
        assert_eq!(snake.head(), Position::new(2, 1));
        assert_eq!(snake.tail(), Position::new(2, 2));
        assert_eq!(grid.cell(Position::new(2, 1)), Some(CellType::Head));
        assert_eq!(grid.cell(Position::new(2, 2)), Some(CellType::Tail));
    }
}
