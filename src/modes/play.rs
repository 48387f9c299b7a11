use anyhow::{bail, Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::game::{Action, Direction, GameConfig, GameEngine, GameState, StepResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::{GameMetrics, TimingStats};
use crate::record::MovementLog;
use crate::render::{PlayStatus, Renderer};

/// Interactive terminal game, steered by the autopilot or the keyboard
pub struct PlayMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    timing: TimingStats,
    renderer: Renderer,
    input_handler: InputHandler,
    recorder: Option<MovementLog>,
    move_interval: Duration,
    frame_interval: Duration,
    should_quit: bool,
    paused: bool,
    pending_direction: Option<Direction>,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let recorder = config
            .record_movements
            .as_deref()
            .map(MovementLog::create)
            .transpose()?;
        let move_interval = config.move_interval();
        let frame_interval = config.frame_interval();

        let mut engine = GameEngine::new(config).context("Failed to set up the game")?;
        let state = engine.reset().context("Failed to place the snake")?;

        let mut mode = Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            timing: TimingStats::default(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            recorder,
            move_interval,
            frame_interval,
            should_quit: false,
            paused: false,
            pending_direction: None,
        };
        mode.record()?;
        Ok(mode)
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.flush()?;
        }

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.move_interval);
        let mut render_timer = interval(self.frame_interval);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused && !self.state.is_over() {
                        self.update_game()?;
                    }
                }

                _ = render_timer.tick() => {
                    if !self.state.is_over() {
                        self.metrics.update();
                    }
                    let status = self.status();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics, &self.timing, status);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            games = self.metrics.games_played,
            won = self.metrics.games_won,
            high_score = self.metrics.high_score,
            "leaving play mode"
        );
        Ok(())
    }

    fn status(&self) -> PlayStatus {
        PlayStatus {
            autopilot: self.engine.autopilot(),
            paused: self.paused,
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::GameAction(Action::Move(direction)) => self.on_direction(direction)?,
            KeyAction::GameAction(Action::Continue) => {}
            KeyAction::TogglePause => {
                self.paused = !self.paused;
                debug!(paused = self.paused, "pause toggled");
            }
            KeyAction::ToggleAutopilot => {
                let enabled = !self.engine.autopilot();
                self.engine.set_autopilot(enabled);
                self.pending_direction = None;
                info!(enabled, "autopilot toggled");
            }
            KeyAction::Restart => self.reset_game()?,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }

        Ok(())
    }

    /// While paused a direction key advances one tick. Under manual control
    /// repeating the current heading moves at once instead of waiting for
    /// the next tick.
    fn on_direction(&mut self, direction: Direction) -> Result<()> {
        if self.state.is_over() {
            return Ok(());
        }
        if self.engine.autopilot() {
            if self.paused {
                self.update_game()?;
            }
            return Ok(());
        }

        self.pending_direction = Some(direction);
        if self.paused || self.state.snake.direction == Some(direction) {
            self.update_game()?;
        }
        Ok(())
    }

    fn update_game(&mut self) -> Result<StepResult> {
        let action = self
            .pending_direction
            .take()
            .map(Action::Move)
            .unwrap_or(Action::Continue);

        let started = Instant::now();
        let result = self.engine.step(&mut self.state, action);
        let elapsed = started.elapsed();
        self.timing.record(elapsed);

        if self.engine.autopilot() && elapsed > self.move_interval {
            warn!(?elapsed, interval = ?self.move_interval, "decision overran the tick");
            bail!("took too long to decide");
        }

        if result.info.collision_type.is_some() || result.info.ate_food || result.won {
            debug!(?result, "step");
        }
        if result.terminated {
            self.metrics.on_game_over(self.state.score, self.state.won);
            info!(
                score = self.state.score,
                steps = self.state.steps,
                won = self.state.won,
                slowest = ?self.timing.max_time(),
                "game over"
            );
        }
        self.record()?;

        Ok(result)
    }

    fn record(&mut self) -> Result<()> {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.write_snapshot(&self.state.grid)?;
        }
        Ok(())
    }

    fn reset_game(&mut self) -> Result<()> {
        self.state = self.engine.reset().context("Failed to restart the game")?;
        self.metrics.on_game_start();
        self.pending_direction = None;
        self.record()
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
