use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Board, Cell, Phase, Snapshot};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        board: &Board,
        snapshot: &Snapshot,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        // The final board stays visible after a collision
        frame.render_widget(self.render_grid(board, snapshot), game_area);

        frame.render_widget(self.render_controls(snapshot.phase), chunks[2]);
    }

    fn render_grid(&self, board: &Board, snapshot: &Snapshot) -> Paragraph<'_> {
        let head = snapshot.snake.first().copied();
        let mut lines = Vec::with_capacity(board.height());

        for y in 0..board.height() {
            let spans: Vec<Span> = (0..board.width())
                .map(|x| self.render_cell(Cell::new(x as i32, y as i32), head, snapshot))
                .collect();
            lines.push(Line::from(spans));
        }

        let (title, border) = match snapshot.phase {
            Phase::Waiting => (
                " Snake - press Space to start ".to_string(),
                Style::default().fg(Color::White),
            ),
            Phase::Running => (" Snake ".to_string(), Style::default().fg(Color::White)),
            Phase::Over => (
                format!(" GAME OVER - Final Score: {} ", snapshot.score),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(border)
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_cell(&self, cell: Cell, head: Option<Cell>, snapshot: &Snapshot) -> Span<'static> {
        if head == Some(cell) {
            Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else if snapshot.snake.contains(&cell) {
            Span::styled("□ ", Style::default().fg(Color::Green))
        } else if snapshot.target == Some(cell) {
            Span::styled(
                "O ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(". ", Style::default().fg(Color::DarkGray))
        }
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let line = match phase {
            Phase::Waiting => Line::from(vec![
                Span::styled("Space", Style::default().fg(Color::Cyan)),
                Span::raw(" to start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            Phase::Over => Line::from(vec![
                Span::styled("Space", Style::default().fg(Color::Green)),
                Span::raw("/"),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" new game | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ]),
            Phase::Running => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
