use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    grid::Grid,
    state::{CollisionType, GameState, MoveOutcome, Position, Snake},
};
use crate::ai::{Decision, Navigator};
use crate::cycle::HamiltonCycle;
use crate::error::SetupError;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// What the navigator chose, when it steered this step
    pub decision: Option<Decision>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// The snake fills the whole grid
    pub won: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn finished(state: &GameState) -> Self {
        Self {
            terminated: true,
            won: state.won,
            info: StepInfo {
                ate_food: false,
                collision_type: None,
                decision: None,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    navigator: Navigator,
    autopilot: bool,
}

impl GameEngine {
    /// Create a new game engine, building the covering cycle for the grid
    pub fn new(config: GameConfig) -> Result<Self, SetupError> {
        let grid = Grid::new(config.grid_rows, config.grid_cols)?;
        let cycle = HamiltonCycle::build(&grid, config.cycle_strategy)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            autopilot: config.autopilot,
            config,
            rng,
            navigator: Navigator::new(cycle),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn cycle(&self) -> &HamiltonCycle {
        self.navigator.cycle()
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Reset the game to initial state.
    ///
    /// The snake is laid along the cycle with its tail on ordinal 0, so the
    /// cycle ahead of the head is free from the first tick.
    pub fn reset(&mut self) -> Result<GameState, SetupError> {
        let mut grid = Grid::new(self.config.grid_rows, self.config.grid_cols)?;
        let cycle = self.navigator.cycle();

        let length = self
            .config
            .initial_snake_length
            .clamp(1, cycle.len().saturating_sub(1).max(1));
        let start = cycle
            .position_at(0)
            .ok_or(SetupError::InvalidSpawn(Position::INVALID))?;
        let mut segments: Vec<Position> = cycle.cells_from(start).take(length).collect();
        segments.reverse();

        let mut snake = Snake::spawn(&mut grid, &segments)?;
        snake.direction = cycle.step(snake.head());

        let mut state = GameState::new(grid, snake);
        self.spawn_food(&mut state.grid);
        info!(
            rows = self.config.grid_rows,
            cols = self.config.grid_cols,
            length,
            "new game"
        );
        Ok(state)
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if state.is_over() {
            return StepResult::finished(state);
        }
        if state.grid.is_all_body() {
            state.won = true;
            return StepResult::finished(state);
        }

        let mut decision = None;
        match action {
            Action::Move(direction) => self.steer(&mut state.snake, direction),
            Action::Continue => {
                if self.autopilot {
                    decision = Some(
                        self.navigator
                            .decide_next(&mut state.grid, &mut state.snake),
                    );
                }
            }
        }

        let outcome = state.snake.advance(&mut state.grid);
        let mut info = StepInfo {
            ate_food: false,
            collision_type: None,
            decision,
        };

        match outcome {
            MoveOutcome::Idle => {
                return StepResult {
                    terminated: false,
                    won: false,
                    info,
                };
            }
            MoveOutcome::Moved => {}
            MoveOutcome::Ate => {
                info.ate_food = true;
                state.score += 1;
                if !self.spawn_food(&mut state.grid) {
                    state.won = true;
                }
            }
            MoveOutcome::Collided(collision) => {
                info.collision_type = Some(collision);
                state.is_alive = false;
                info!(?collision, score = state.score, steps = state.steps, "snake died");
            }
        }
        state.steps += 1;

        if state.is_alive && state.grid.is_all_body() {
            state.won = true;
        }
        if state.won {
            info!(score = state.score, steps = state.steps, "grid filled");
        }

        StepResult {
            terminated: state.is_over(),
            won: state.won,
            info,
        }
    }

    /// Manual steering; a reversal onto the neck is ignored
    fn steer(&self, snake: &mut Snake, direction: Direction) {
        let reverses = snake.len() > 1
            && snake
                .direction
                .is_some_and(|current| current.is_opposite(direction));
        if !reverses {
            snake.direction = Some(direction);
        }
    }

    /// Place food on a random empty cell; false when none is left
    fn spawn_food(&mut self, grid: &mut Grid) -> bool {
        let empty = grid.empty_points();
        match empty.choose(&mut self.rng) {
            Some(&pos) => {
                grid.create_food(pos);
                debug!(row = pos.row, col = pos.col, "food placed");
                true
            }
            None => false,
        }
    }
}
