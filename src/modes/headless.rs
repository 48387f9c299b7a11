use std::fmt;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::ai::Decision;
use crate::cycle::CycleStrategy;
use crate::game::{Action, GameConfig, GameEngine, GameState};
use crate::metrics::{TimingStats, TimingSummary};
use crate::record::MovementLog;

/// Outcome of one game played without a terminal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub rows: usize,
    pub cols: usize,
    pub strategy: CycleStrategy,
    pub seed: Option<u64>,
    pub won: bool,
    pub alive: bool,
    pub score: u32,
    pub steps: u32,
    pub length: usize,
    pub shortcuts: u32,
    pub cycle_moves: u32,
    pub decide: TimingSummary,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match (self.won, self.alive) {
            (true, _) => "won",
            (false, true) => "stopped",
            (false, false) => "died",
        };
        writeln!(
            f,
            "{}x{} grid, {:?} cycle: {outcome}",
            self.rows, self.cols, self.strategy
        )?;
        writeln!(
            f,
            "  score {}  length {}  steps {}",
            self.score, self.length, self.steps
        )?;
        writeln!(
            f,
            "  shortcuts {}  cycle moves {}",
            self.shortcuts, self.cycle_moves
        )?;
        write!(
            f,
            "  decide avg {:.3}ms  max {:.3}ms",
            self.decide.avg_ms, self.decide.max_ms
        )
    }
}

/// Plays one autopilot game to the end, or until a step limit
pub struct HeadlessMode {
    config: GameConfig,
    engine: GameEngine,
    state: GameState,
    timing: TimingStats,
    recorder: Option<MovementLog>,
    max_steps: Option<u32>,
}

impl HeadlessMode {
    pub fn new(config: GameConfig, max_steps: Option<u32>) -> Result<Self> {
        let recorder = config
            .record_movements
            .as_deref()
            .map(MovementLog::create)
            .transpose()?;

        let mut engine = GameEngine::new(config.clone()).context("Failed to set up the game")?;
        // Nobody is at the keyboard
        engine.set_autopilot(true);
        let state = engine.reset().context("Failed to place the snake")?;

        Ok(Self {
            config,
            engine,
            state,
            timing: TimingStats::default(),
            recorder,
            max_steps,
        })
    }

    pub fn run(&mut self) -> Result<RunSummary> {
        let (mut shortcuts, mut cycle_moves) = (0, 0);
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.write_snapshot(&self.state.grid)?;
        }

        while !self.state.is_over() {
            if self.max_steps.is_some_and(|limit| self.state.steps >= limit) {
                info!(steps = self.state.steps, "step limit reached");
                break;
            }

            let (engine, state) = (&mut self.engine, &mut self.state);
            let result = self.timing.time(|| engine.step(state, Action::Continue));
            match result.info.decision {
                Some(Decision::Shortcut(_)) => shortcuts += 1,
                Some(Decision::FollowCycle(_)) => cycle_moves += 1,
                Some(Decision::Idle) | None => {}
            }
            if result.info.ate_food {
                debug!(score = self.state.score, steps = self.state.steps, "ate");
            }
            if let Some(recorder) = self.recorder.as_mut() {
                recorder.write_snapshot(&self.state.grid)?;
            }
        }

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.flush()?;
        }

        let summary = RunSummary {
            rows: self.config.grid_rows,
            cols: self.config.grid_cols,
            strategy: self.config.cycle_strategy,
            seed: self.config.seed,
            won: self.state.won,
            alive: self.state.is_alive,
            score: self.state.score,
            steps: self.state.steps,
            length: self.state.snake.len(),
            shortcuts,
            cycle_moves,
            decide: self.timing.summary(),
        };
        info!(
            won = summary.won,
            score = summary.score,
            steps = summary.steps,
            "headless run finished"
        );
        Ok(summary)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}

/// Print a summary as text or as pretty JSON
pub fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(summary).context("Failed to encode summary")?;
        println!("{text}");
    } else {
        println!("{summary}");
    }
    Ok(())
}
