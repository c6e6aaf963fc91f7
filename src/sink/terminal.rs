use log::warn;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color as TermColor, Style};

use super::RenderSink;
use crate::config::GridSize;
use crate::grid::Grid;
use crate::pixel::{Color, Coordinate, Pixel};
use crate::terminal_runtime::TerminalSession;

/// Upper half-block: foreground paints the even row, background the odd one.
const GLYPH_HALF_UPPER: &str = "▀";

const FOOTER: &str = "arrows/hjkl move, q quits";

impl From<Color> for TermColor {
    fn from(color: Color) -> Self {
        TermColor::Rgb(color.r, color.g, color.b)
    }
}

/// Draws frames in the terminal, two board rows per terminal row.
pub struct TerminalSink {
    session: TerminalSession,
    bounds: GridSize,
}

impl TerminalSink {
    #[must_use]
    pub fn new(session: TerminalSession, bounds: GridSize) -> Self {
        Self { session, bounds }
    }
}

impl RenderSink for TerminalSink {
    fn draw(&mut self, pixels: Vec<Pixel>) {
        let grid = Grid::from_pixels(pixels);
        let bounds = self.bounds;

        if let Err(e) = self
            .session
            .terminal_mut()
            .draw(|frame| paint(frame, &grid, bounds))
        {
            warn!("failed to draw frame: {e}");
        }
    }
}

fn paint(frame: &mut Frame<'_>, grid: &Grid, bounds: GridSize) {
    let area = frame.area();
    let rows = bounds.height.div_ceil(2);
    let buffer = frame.buffer_mut();

    for row in 0..rows {
        for x in 0..bounds.width {
            let Some((term_x, term_y)) = cell_position(area, x, row) else {
                continue;
            };

            let upper = color_at(grid, x, row * 2);
            let lower = color_at(grid, x, row * 2 + 1);
            buffer.set_string(
                term_x,
                term_y,
                GLYPH_HALF_UPPER,
                Style::new().fg(upper).bg(lower),
            );
        }
    }

    let footer_y = area.y.saturating_add(rows).saturating_add(1);
    if footer_y < area.bottom() {
        buffer.set_stringn(
            area.x,
            footer_y,
            FOOTER,
            usize::from(area.width),
            Style::new(),
        );
    }
}

fn color_at(grid: &Grid, x: u16, y: u16) -> TermColor {
    grid.get(Coordinate::new(i32::from(x), i32::from(y)))
        .map_or(TermColor::Reset, |pixel| pixel.color.into())
}

fn cell_position(area: Rect, x: u16, row: u16) -> Option<(u16, u16)> {
    let term_x = area.x.checked_add(x)?;
    let term_y = area.y.checked_add(row)?;
    if term_x >= area.right() || term_y >= area.bottom() {
        return None;
    }

    Some((term_x, term_y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Position;
    use ratatui::style::Color as TermColor;

    use crate::config::GridSize;
    use crate::grid::Grid;
    use crate::pixel::{Color, Pixel};

    use super::{paint, GLYPH_HALF_UPPER};

    const BLUE: Color = Color::rgb(0x64, 0x95, 0xed);
    const GREEN: Color = Color::rgb(0, 0xff, 0);

    #[test]
    fn two_board_rows_share_one_terminal_row() {
        let bounds = GridSize {
            width: 3,
            height: 3,
        };
        let background = Grid::fill(BLUE, bounds);
        let snake = Grid::from(Pixel::new(1, 1, GREEN));
        let frame = Grid::merge([&background, &snake]);
        let mut terminal = Terminal::new(TestBackend::new(30, 6)).expect("test terminal");

        terminal
            .draw(|f| paint(f, &frame, bounds))
            .expect("draw succeeds");

        let buffer = terminal.backend().buffer();
        let top = &buffer[Position::new(1, 0)];
        assert_eq!(top.symbol(), GLYPH_HALF_UPPER);
        assert_eq!(top.fg, TermColor::from(BLUE));
        assert_eq!(top.bg, TermColor::from(GREEN));

        // Odd height: the last terminal row has no lower board row.
        let bottom = &buffer[Position::new(1, 1)];
        assert_eq!(bottom.fg, TermColor::from(BLUE));
        assert_eq!(bottom.bg, TermColor::Reset);
    }

    #[test]
    fn painting_into_a_small_terminal_clips() {
        let bounds = GridSize {
            width: 25,
            height: 25,
        };
        let frame = Grid::fill(BLUE, bounds);
        let mut terminal = Terminal::new(TestBackend::new(5, 2)).expect("test terminal");

        terminal
            .draw(|f| paint(f, &frame, bounds))
            .expect("draw succeeds");

        let corner = &terminal.backend().buffer()[Position::new(4, 1)];
        assert_eq!(corner.symbol(), GLYPH_HALF_UPPER);
    }
}
