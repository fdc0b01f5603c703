use std::io::{self, stdout, Stdout};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use log::error;
use ratatui::{prelude::*, widgets::*};

use crate::game::{Cell, Game, Status, BOARD_HEIGHT, BOARD_WIDTH};
use crate::render::Renderer;

/// The windowed display needs room for the board, its border, and the score
/// line above it.
pub const MIN_WIDTH: u16 = BOARD_WIDTH as u16 + 2;
pub const MIN_HEIGHT: u16 = BOARD_HEIGHT as u16 + 3;

/// Bordered, color-styled board on the alternate screen. ratatui diffs
/// against the previous frame, so unchanged regions (the score line between
/// level-ups, the border) are never rewritten.
pub struct TuiRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiRenderer {
    pub fn new() -> io::Result<Self> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(TuiRenderer { terminal })
    }
}

impl Renderer for TuiRenderer {
    fn draw(&mut self, game: &Game) -> io::Result<()> {
        self.terminal.draw(|frame| render_frame(frame, game))?;
        Ok(())
    }

    /// Keeps the final screen up until a key is pressed, then lets the guards
    /// restore the terminal.
    fn farewell(&mut self, game: &Game) -> io::Result<()> {
        self.terminal.draw(|frame| render_frame(frame, game))?;
        wait_key()
    }
}

impl Drop for TuiRenderer {
    fn drop(&mut self) {
        if let Err(err) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            error!("Failed to leave the alternate screen: {err}");
        }
        if let Err(err) = self.terminal.show_cursor() {
            error!("Failed to restore the cursor: {err}");
        }
    }
}

fn wait_key() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                return Ok(());
            }
        }
    }
}

fn render_frame(frame: &mut Frame, game: &Game) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(BOARD_HEIGHT as u16 + 2),
            Constraint::Min(0),
        ])
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(format!("Snake CLI - lvl {}", game.level())),
        layout[0],
    );

    let board_area = Rect {
        width: layout[1].width.min(MIN_WIDTH),
        ..layout[1]
    };
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);
    frame.render_widget(game, inner);

    if game.status() == Status::Dead {
        let banner = Rect {
            y: inner.y + inner.height / 2,
            height: inner.height.min(1),
            ..inner
        };
        frame.render_widget(Paragraph::new("GAME OVER").alignment(Alignment::Center), banner);
    }
}

impl Widget for &Game {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (y, row) in self.board().iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let col = area.x + x as u16;
                let line = area.y + y as u16;
                if col >= area.right() || line >= area.bottom() {
                    continue;
                }
                match cell {
                    Cell::Snake => {
                        buf[(col, line)].set_symbol(" ").set_bg(Color::Green);
                    }
                    Cell::Apple => {
                        buf[(col, line)].set_symbol(" ").set_bg(Color::Red);
                    }
                    Cell::Empty => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_board_cells_are_background_styled() {
        let mut rng = StdRng::seed_from_u64(7);
        let game = Game::new(false, &mut rng);
        let area = Rect::new(0, 0, BOARD_WIDTH as u16, BOARD_HEIGHT as u16);
        let mut buf = Buffer::empty(area);

        (&game).render(area, &mut buf);

        let mut green = 0;
        let mut red = 0;
        for y in 0..area.height {
            for x in 0..area.width {
                match buf[(x, y)].bg {
                    Color::Green => green += 1,
                    Color::Red => red += 1,
                    _ => {}
                }
            }
        }

        // The fresh snake is stacked on one cell; the apple may hide under it
        assert_eq!(green, 1);
        assert!(red <= 1);
    }

    #[test]
    fn test_render_clips_to_the_given_area() {
        let mut rng = StdRng::seed_from_u64(7);
        let game = Game::new(false, &mut rng);
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);

        // Must not panic even though the board is larger than the area
        (&game).render(area, &mut buf);
    }
}
