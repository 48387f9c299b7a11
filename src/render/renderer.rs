use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{CellType, GameState, Grid};
use crate::metrics::{timing::format_duration, GameMetrics, TimingStats};

/// Play loop flags shown next to the score
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayStatus {
    pub autopilot: bool,
    pub paused: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        timing: &TimingStats,
        status: PlayStatus,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics, timing, status), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.is_over() {
            frame.render_widget(self.render_game_over(state), game_area);
        } else {
            frame.render_widget(self.render_grid(&state.grid), game_area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, grid: &Grid) -> Paragraph<'static> {
        let lines: Vec<Line> = grid
            .rows_iter()
            .map(|row| Line::from(row.iter().map(|&cell| cell_span(cell)).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Hamilton Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        timing: &TimingStats,
        status: PlayStatus,
    ) -> Paragraph<'static> {
        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));
        let value = |text: String| Span::styled(text, Style::default().fg(Color::White));

        let mut spans = vec![
            label("Score: "),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            label("Steps: "),
            value(state.steps.to_string()),
            Span::raw("    "),
            label("Time: "),
            value(metrics.format_time()),
            Span::raw("    "),
            label("Best: "),
            value(metrics.high_score.to_string()),
            Span::raw("    "),
            label("Decide: "),
            value(format_duration(timing.avg_time())),
            Span::raw("    "),
        ];
        spans.push(if status.autopilot {
            Span::styled("AUTO", Style::default().fg(Color::Cyan))
        } else {
            Span::styled("MANUAL", Style::default().fg(Color::Magenta))
        });
        if status.paused {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'static> {
        let (title, color) = if state.won {
            ("GRID FILLED", Color::Green)
        } else {
            ("GAME OVER", Color::Red)
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.snake.len().to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let key = |text: &'static str| Span::styled(text, Style::default().fg(Color::Cyan));
        let text = vec![Line::from(vec![
            key("↑↓←→"),
            Span::raw(" or "),
            key("WASD"),
            Span::raw(" to steer | "),
            key("Space"),
            Span::raw(" pause | "),
            key("I"),
            Span::raw(" autopilot | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-column glyph for a cell
fn cell_span(cell: CellType) -> Span<'static> {
    match cell {
        CellType::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        CellType::Wall => Span::styled("# ", Style::default().fg(Color::White)),
        CellType::Food => Span::styled(
            "O ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        CellType::Head => Span::styled(
            "■ ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        CellType::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
        CellType::Tail => Span::styled("□ ", Style::default().fg(Color::Blue)),
        CellType::VisitMark => Span::styled("· ", Style::default().fg(Color::Gray)),
        CellType::PathMark => Span::styled("* ", Style::default().fg(Color::Magenta)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, Snake};
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_cell_spans_are_two_columns() {
        for cell in [
            CellType::Empty,
            CellType::Wall,
            CellType::Food,
            CellType::Head,
            CellType::Body,
            CellType::Tail,
            CellType::VisitMark,
            CellType::PathMark,
        ] {
            assert_eq!(cell_span(cell).width(), 2, "{cell:?}");
        }
    }

    fn small_state() -> GameState {
        let mut grid = Grid::new(6, 6).unwrap();
        let snake = Snake::spawn(&mut grid, &[Position::new(1, 2), Position::new(1, 1)]).unwrap();
        grid.create_food(Position::new(3, 3));
        GameState::new(grid, snake)
    }

    #[test]
    fn test_render_running_game() {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let state = small_state();
        let status = PlayStatus {
            autopilot: true,
            paused: true,
        };

        terminal
            .draw(|frame| {
                Renderer::new().render(
                    frame,
                    &state,
                    &GameMetrics::new(),
                    &TimingStats::default(),
                    status,
                )
            })
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Score:"));
        assert!(screen.contains("AUTO"));
        assert!(screen.contains("PAUSED"));
        assert!(screen.contains("Hamilton Snake"));
    }

    #[test]
    fn test_render_won_game() {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let mut state = small_state();
        state.won = true;

        terminal
            .draw(|frame| {
                Renderer::new().render(
                    frame,
                    &state,
                    &GameMetrics::new(),
                    &TimingStats::default(),
                    PlayStatus::default(),
                )
            })
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("GRID FILLED"));
        assert!(screen.contains("MANUAL"));
    }
}
