use tracing::trace;

use crate::cycle::HamiltonCycle;
use crate::game::{CellType, Direction, Grid, Position, Snake};
use crate::search::{Path, PathFinder};

/// Which search [`Navigator::path_to`] runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Shortest,
    Longest,
}

/// What the navigator chose for the coming move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Leave the cycle towards the food
    Shortcut(Direction),
    /// Take the cycle's own next step
    FollowCycle(Direction),
    /// Nothing to decide: the snake is dead or off the cycle
    Idle,
}

impl Decision {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Decision::Shortcut(d) | Decision::FollowCycle(d) => Some(*d),
            Decision::Idle => None,
        }
    }
}

/// Picks the snake's next direction each tick.
///
/// The snake always has the cycle to fall back on: every cell from the head
/// forward to the tail along the cycle is free, so following the cycle never
/// collides. A shortcut towards the food is taken only when its first step
/// lands strictly between the head and the food in cycle order measured
/// from the tail, which keeps that property.
#[derive(Debug)]
pub struct Navigator {
    cycle: HamiltonCycle,
    finder: PathFinder,
}

impl Navigator {
    pub fn new(cycle: HamiltonCycle) -> Self {
        Self {
            cycle,
            finder: PathFinder::new(),
        }
    }

    pub fn cycle(&self) -> &HamiltonCycle {
        &self.cycle
    }

    /// Set the snake's pending direction for the next move
    pub fn decide_next(&mut self, grid: &mut Grid, snake: &mut Snake) -> Decision {
        if snake.is_dead() || snake.is_empty() {
            return Decision::Idle;
        }
        let head = snake.head();
        let tail = snake.tail();

        if let Some(food) = grid.food() {
            let path = self.path_to(grid, snake, PathKind::Shortest, food);
            if let Some(&step) = path.first() {
                let next = head.adjacent(step);
                if self.is_safe_shortcut(tail, head, next, food) {
                    trace!(?step, len = path.len(), "taking shortcut");
                    snake.direction = Some(step);
                    return Decision::Shortcut(step);
                }
            }
        }

        match self.cycle.step(head) {
            Some(step) => {
                snake.direction = Some(step);
                Decision::FollowCycle(step)
            }
            None => Decision::Idle,
        }
    }

    /// `head < next < food` in cycle order starting from `tail`
    fn is_safe_shortcut(&self, tail: Position, head: Position, next: Position, food: Position) -> bool {
        let locate = |p| self.cycle.location(tail, p);
        match (locate(head), locate(next), locate(food)) {
            (Some(h), Some(n), Some(f)) => h < n && n < f,
            _ => false,
        }
    }

    /// Path from the snake's head to `target`.
    ///
    /// The target cell is searchable only while empty, so its type is set to
    /// `Empty` for the duration of the search and restored afterwards.
    pub fn path_to(&mut self, grid: &mut Grid, snake: &Snake, kind: PathKind, target: Position) -> Path {
        let Some(original) = grid.cell(target).filter(|_| grid.is_inside(target)) else {
            return Path::new();
        };

        grid.set_cell(target, CellType::Empty);
        let (head, heading) = (snake.head(), snake.direction);
        let path = match kind {
            PathKind::Shortest => self.finder.find_min_path(grid, head, target, heading),
            PathKind::Longest => self.finder.find_max_path(grid, head, target, heading),
        };
        grid.set_cell(target, original);
        path
    }

    pub fn min_path_to_food(&mut self, grid: &mut Grid, snake: &Snake) -> Path {
        match grid.food() {
            Some(food) => self.path_to(grid, snake, PathKind::Shortest, food),
            None => Path::new(),
        }
    }

    pub fn min_path_to_tail(&mut self, grid: &mut Grid, snake: &Snake) -> Path {
        self.path_to(grid, snake, PathKind::Shortest, snake.tail())
    }

    pub fn max_path_to_tail(&mut self, grid: &mut Grid, snake: &Snake) -> Path {
        self.path_to(grid, snake, PathKind::Longest, snake.tail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::CycleStrategy;
    use crate::search::walk;

    // Serpentine ordinals on a 6x6 grid (4x4 interior):
    //
    //   15  0  1  2
    //   14  5  4  3
    //   13  6  7  8
    //   12 11 10  9
    fn serpentine_6x6() -> (Grid, Navigator) {
        let grid = Grid::new(6, 6).unwrap();
        let cycle = HamiltonCycle::build(&grid, CycleStrategy::Serpentine).unwrap();
        (grid, Navigator::new(cycle))
    }

    #[test]
    fn test_shortcut_towards_food() {
        let (mut grid, mut navigator) = serpentine_6x6();
        let mut snake =
            Snake::spawn(&mut grid, &[Position::new(1, 3), Position::new(1, 2)]).unwrap();
        snake.direction = Some(Direction::Right);
        grid.create_food(Position::new(3, 3));

        let decision = navigator.decide_next(&mut grid, &mut snake);

        assert_eq!(decision, Decision::Shortcut(Direction::Down));
        assert_eq!(snake.direction, Some(Direction::Down));
        // Food cell restored after the search
        assert_eq!(grid.cell(Position::new(3, 3)), Some(CellType::Food));
    }

    #[test]
    fn test_rejects_shortcut_onto_food_behind_tail() {
        let (mut grid, mut navigator) = serpentine_6x6();
        let mut snake = Snake::spawn(
            &mut grid,
            &[Position::new(2, 2), Position::new(2, 3), Position::new(2, 4)],
        )
        .unwrap();
        snake.direction = Some(Direction::Left);
        grid.create_food(Position::new(1, 2));

        let decision = navigator.decide_next(&mut grid, &mut snake);

        assert_eq!(decision, Decision::FollowCycle(Direction::Down));
        assert_eq!(snake.direction, Some(Direction::Down));
    }

    #[test]
    fn test_follows_cycle_without_food() {
        let (mut grid, mut navigator) = serpentine_6x6();
        let mut snake = Snake::spawn(&mut grid, &[Position::new(1, 4)]).unwrap();

        let decision = navigator.decide_next(&mut grid, &mut snake);

        assert_eq!(decision, Decision::FollowCycle(Direction::Down));
        assert_eq!(decision.direction(), Some(Direction::Down));
    }

    #[test]
    fn test_dead_snake_is_idle() {
        let (mut grid, mut navigator) = serpentine_6x6();
        let mut snake = Snake::spawn(&mut grid, &[Position::new(1, 1)]).unwrap();
        snake.direction = Some(Direction::Up);
        snake.advance(&mut grid);
        assert!(snake.is_dead());

        assert_eq!(navigator.decide_next(&mut grid, &mut snake), Decision::Idle);
    }

    #[test]
    fn test_adjacent_food_single_step() {
        let (mut grid, mut navigator) = serpentine_6x6();
        let mut snake = Snake::spawn(&mut grid, &[Position::new(2, 2)]).unwrap();
        snake.direction = Some(Direction::Up);
        grid.create_food(Position::new(2, 3));

        let path = navigator.min_path_to_food(&mut grid, &snake);
        assert_eq!(path, vec![Direction::Right]);
    }

    #[test]
    fn test_paths_to_tail_restore_cell() {
        let (mut grid, mut navigator) = serpentine_6x6();
        let snake = Snake::spawn(
            &mut grid,
            &[Position::new(1, 3), Position::new(1, 2), Position::new(1, 1)],
        )
        .unwrap();

        let shortest = navigator.min_path_to_tail(&mut grid, &snake);
        let longest = navigator.max_path_to_tail(&mut grid, &snake);

        assert_eq!(shortest.len(), 4);
        assert!(longest.len() >= shortest.len());
        assert_eq!(walk(snake.head(), &longest).last(), Some(&snake.tail()));
        assert_eq!(grid.cell(snake.tail()), Some(CellType::Tail));
    }

    #[test]
    fn test_path_to_outside_target_is_empty() {
        let (mut grid, mut navigator) = serpentine_6x6();
        let snake = Snake::spawn(&mut grid, &[Position::new(1, 1)]).unwrap();
        assert!(navigator
            .path_to(&mut grid, &snake, PathKind::Shortest, Position::INVALID)
            .is_empty());
        assert!(navigator
            .path_to(&mut grid, &snake, PathKind::Longest, Position::new(0, 3))
            .is_empty());
    }
}
