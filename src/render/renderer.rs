use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameOutcome, GameState, Position, RunState, TickSpeed};
use crate::metrics::GameMetrics;

/// One-line description of where the game is
pub fn status_text(run_state: RunState) -> &'static str {
    match run_state {
        RunState::NotStarted => "Press Enter to start",
        RunState::Running => "Playing",
        RunState::Paused => "Paused",
        RunState::GameOver(GameOutcome::Won) => "You Win! Full board.",
        RunState::GameOver(GameOutcome::Collision(_)) => "Game Over! Press R to restart.",
    }
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
        speed: TickSpeed,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics, speed);
        frame.render_widget(stats, chunks[0]);

        // Two terminal columns per cell, plus the border
        let board_width = state.cols * 2 + 2;
        let board_height = state.rows + 2;

        match state.run_state {
            RunState::GameOver(outcome) => {
                let area = Self::centered(chunks[1], board_width.max(40), board_height.max(10));
                let game_over = self.render_game_over(state, metrics, outcome);
                frame.render_widget(game_over, area);
            }
            _ => {
                let area = Self::centered(chunks[1], board_width, board_height);
                let grid = self.render_grid(state);
                frame.render_widget(grid, area);
            }
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// A `width` x `height` rect in the middle of `area`, shrunk to fit
    fn centered(area: Rect, width: usize, height: usize) -> Rect {
        let width = u16::try_from(width).unwrap_or(u16::MAX).min(area.width);
        let height = u16::try_from(height).unwrap_or(u16::MAX).min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.rows);

        for y in 0..state.rows {
            let mut spans = Vec::with_capacity(state.cols);

            for x in 0..state.cols {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.contains(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if state.food == Some(pos) {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = match state.run_state {
            RunState::Paused => " Snake (paused) ",
            _ => " Snake ",
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        )
    }

    fn render_stats(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        speed: TickSpeed,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![
            Line::from(vec![
                Span::styled("Score: ", label),
                Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
                Span::raw("    "),
                Span::styled("High: ", label),
                Span::styled(state.high_score.to_string(), value),
                Span::raw("    "),
                Span::styled("Speed: ", label),
                Span::styled(speed.to_string(), value),
                Span::raw("    "),
                Span::styled("Time: ", label),
                Span::styled(metrics.format_time(), value),
            ]),
            Line::from(Span::styled(
                status_text(state.run_state),
                Style::default().fg(Color::Cyan),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        outcome: GameOutcome,
    ) -> Paragraph<'_> {
        let (headline, color) = match outcome {
            GameOutcome::Won => ("YOU WIN", Color::Green),
            GameOutcome::Collision(_) => ("GAME OVER", Color::Red),
        };

        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if metrics.new_record {
            text.push(Line::from(Span::styled(
                "New high score!",
                Style::default().fg(Color::Magenta),
            )));
        }

        text.extend([
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
        ]);

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", key),
            Span::raw("/"),
            Span::styled("WASD", key),
            Span::raw(" move | "),
            Span::styled("Enter", key),
            Span::raw(" start | "),
            Span::styled("Space", key),
            Span::raw("/"),
            Span::styled("P", key),
            Span::raw(" pause | "),
            Span::styled("R", key),
            Span::raw(" restart | "),
            Span::styled("+/-", key),
            Span::raw(" speed | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
