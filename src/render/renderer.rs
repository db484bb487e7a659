use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph,
        canvas::{Canvas, Context, Line as CanvasLine},
    },
};

use crate::game::{self, Blob, GameState};
use crate::metrics::RunStats;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the whole screen: stats header, board, status/controls footer
    pub fn render(&self, frame: &mut Frame, state: &GameState, stats: &RunStats, status: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, stats), chunks[0]);

        // Center the board horizontally
        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        frame.render_widget(self.render_board(state), board_area);
        frame.render_widget(self.render_controls(status), chunks[2]);
    }

    /// Clear the board, draw both blobs as filled squares, overlay the score
    fn render_board<'a>(&self, state: &'a GameState) -> Canvas<'a, impl Fn(&mut Context) + 'a> {
        let board = f64::from(state.board_size);

        Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Chase "),
            )
            .background_color(Color::Black)
            .marker(Marker::Braille)
            .x_bounds([0.0, board])
            .y_bounds([0.0, board])
            .paint(move |ctx| {
                fill_square(ctx, &state.agent.blob, board);
                fill_square(ctx, &state.target.blob, board);
                ctx.print(
                    board / 2.0,
                    board / 2.0,
                    Span::styled(
                        format!("Score: {}", state.agent.score),
                        Style::default()
                            .fg(to_color(game::Color::WHITE))
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            })
    }

    fn render_stats(&self, state: &GameState, stats: &RunStats) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                state.agent.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Distance: ", label),
            Span::styled(format!("{:.1}", state.distance()), value),
            Span::raw("    "),
            Span::styled("Reward: ", label),
            Span::styled(format!("{:+.0}", stats.last_reward), value),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(stats.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(stats.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, status: &str) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(status.to_string(), Style::default().fg(Color::Gray))),
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Space", Style::default().fg(Color::Cyan)),
                Span::raw(" pause | "),
                Span::styled("1-4", Style::default().fg(Color::Cyan)),
                Span::raw(" speed | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" reset | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_color(color: game::Color) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

/// Fill a blob's square with horizontal lines. Board y grows downwards,
/// canvas y grows upwards.
fn fill_square(ctx: &mut Context, blob: &Blob, board: f64) {
    let x = f64::from(blob.position.x);
    let top = board - f64::from(blob.position.y);
    let width = f64::from(blob.size.width);
    let color = to_color(blob.color);

    for row in 0..blob.size.height {
        let y = top - f64::from(row);
        ctx.draw(&CanvasLine {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y,
            color,
        });
    }
}
