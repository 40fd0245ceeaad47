use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Context, Rectangle},
        Block, BorderType, Borders, Paragraph,
    },
    Frame,
};

use super::sprites::{FilledDisc, FilledSquare};
use crate::game::{CollisionType, EndReason, GameState, Phase, Position};
use crate::metrics::Scoreboard;

pub const BACKGROUND: Color = Color::Rgb(0x00, 0x00, 0x00);
pub const HEAD_COLOR: Color = Color::Rgb(0x4a, 0xde, 0x80);
pub const BODY_COLOR: Color = Color::Rgb(0x22, 0xc5, 0x5e);
pub const OUTLINE_COLOR: Color = Color::Rgb(0x16, 0xa3, 0x4a);
pub const FOOD_COLOR: Color = Color::Rgb(0xef, 0x44, 0x44);

/// Gap left between neighbouring squares, in canvas units
const CELL_GAP: f64 = 2.0;
/// How far the fill stays inside a segment's outline, as a share of the cell
const OUTLINE_SHARE: f64 = 0.15;

/// Maps grid cells to canvas units.
///
/// Grid row 0 is the top of the board while canvas y grows upwards, so
/// rows are flipped here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    pub grid_size: usize,
    pub cell: f64,
}

impl BoardGeometry {
    pub fn new(grid_size: usize, cell_size: u16) -> Self {
        Self {
            grid_size,
            cell: cell_size as f64,
        }
    }

    pub fn extent(&self) -> f64 {
        self.grid_size as f64 * self.cell
    }

    /// Square drawn for a snake segment: side `cell - 2` at the cell's top-left
    pub fn segment(&self, pos: Position, color: Color) -> FilledSquare {
        let size = self.cell - CELL_GAP;
        FilledSquare {
            x: pos.x as f64 * self.cell,
            y: self.extent() - pos.y as f64 * self.cell - size,
            size,
            color,
        }
    }

    pub fn outline(&self, square: &FilledSquare) -> Rectangle {
        Rectangle {
            x: square.x,
            y: square.y,
            width: square.size,
            height: square.size,
            color: OUTLINE_COLOR,
        }
    }

    /// Disc centred on the food cell with radius `cell / 2 - 2`
    pub fn food(&self, pos: Position) -> FilledDisc {
        let half = self.cell / 2.0;
        FilledDisc {
            x: pos.x as f64 * self.cell + half,
            y: self.extent() - pos.y as f64 * self.cell - half,
            radius: half - CELL_GAP,
            color: FOOD_COLOR,
        }
    }
}

/// Largest rect inside `area` whose braille canvas is square.
///
/// A braille cell holds 2x4 dots, so the board needs twice as many
/// columns as rows (plus the border).
pub fn board_rect(area: Rect) -> Rect {
    let rows = area.height.min(area.width.saturating_sub(2) / 2 + 1).max(3);
    let inner_rows = rows.saturating_sub(2);
    let width = (inner_rows * 2 + 2).min(area.width);
    let height = rows.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draws the game. Reads state only.
pub struct Renderer {
    cell_size: u16,
}

impl Renderer {
    pub fn new(cell_size: u16) -> Self {
        Self { cell_size }
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, scoreboard: &Scoreboard) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, scoreboard), chunks[0]);

        let board_area = board_rect(chunks[1]);
        match state.phase {
            Phase::GameOver(reason) => {
                frame.render_widget(self.render_game_over(state, reason), board_area);
            }
            _ => {
                let geometry = BoardGeometry::new(state.grid_size, self.cell_size);
                frame.render_widget(self.board_canvas(state, geometry), board_area);
            }
        }

        frame.render_widget(self.render_controls(state.phase), chunks[2]);
    }

    fn board_canvas<'s>(
        &self,
        state: &'s GameState,
        geometry: BoardGeometry,
    ) -> Canvas<'s, impl Fn(&mut Context) + 's> {
        let extent = geometry.extent();

        Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .marker(Marker::Braille)
            .background_color(BACKGROUND)
            .x_bounds([0.0, extent])
            .y_bounds([0.0, extent])
            .paint(move |ctx| draw_board(ctx, state, geometry))
    }

    fn render_stats(&self, state: &GameState, scoreboard: &Scoreboard) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value),
            Span::raw("    "),
            Span::styled("High Score: ", label),
            Span::styled(scoreboard.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(scoreboard.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, reason: EndReason) -> Paragraph<'static> {
        let (title, cause) = match reason {
            EndReason::Collision(CollisionType::Wall) => ("GAME OVER", "Hit the wall"),
            EndReason::Collision(CollisionType::SelfCollision) => {
                ("GAME OVER", "Bit your own tail")
            }
            EndReason::BoardFull => ("BOARD CLEARED", "No room left for food"),
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                title,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
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
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'static> {
        let line = if phase == Phase::Ready {
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to start"),
            ])
        } else {
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" to restart | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(20)
    }
}

/// Food first, then body, head last so it keeps its own colour.
///
/// A braille cell takes the colour of the last dot painted in it, so each
/// segment paints its outline before an inset fill.
fn draw_board(ctx: &mut Context, state: &GameState, geometry: BoardGeometry) {
    ctx.draw(&geometry.food(state.food));

    let segments = state
        .snake
        .body
        .iter()
        .enumerate()
        .filter(|(_, pos)| state.is_in_bounds(**pos));

    for (index, pos) in segments.rev() {
        let color = if index == 0 { HEAD_COLOR } else { BODY_COLOR };
        let square = geometry.segment(*pos, color);
        ctx.draw(&geometry.outline(&square));
        ctx.draw(&square.inset(geometry.cell * OUTLINE_SHARE));
    }
}
