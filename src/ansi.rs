use std::io::{self, stdout, Stdout, Write};

use crossterm::{cursor, queue};

use crate::game::{Cell, Game, Status, BOARD_WIDTH};
use crate::render::Renderer;

const APPLE_CHAR: char = 'O';
const SNAKE_CHAR: char = 'X';

/// Whole-board text dump: reprints every cell each tick, then jumps the
/// cursor back to the position saved at startup so the next frame overwrites
/// in place. The final frame skips the jump and leaves the board on screen.
pub struct AnsiRenderer {
    stdout: Stdout,
}

impl AnsiRenderer {
    pub fn new() -> io::Result<Self> {
        let mut stdout = stdout();
        queue!(stdout, cursor::SavePosition)?;
        stdout.flush()?;
        Ok(AnsiRenderer { stdout })
    }
}

impl Renderer for AnsiRenderer {
    fn draw(&mut self, game: &Game) -> io::Result<()> {
        self.stdout.write_all(frame_text(game).as_bytes())?;
        if game.status() == Status::Running {
            queue!(self.stdout, cursor::RestorePosition)?;
        }
        self.stdout.flush()
    }
}

fn frame_text(game: &Game) -> String {
    let mut text = format!("Snake CLI - lvl {}\r\n", game.level());
    push_border(&mut text);
    for row in game.board() {
        text.push('|');
        for cell in row {
            text.push(match cell {
                Cell::Empty => ' ',
                Cell::Apple => APPLE_CHAR,
                Cell::Snake => SNAKE_CHAR,
            });
        }
        text.push_str("|\r\n");
    }
    push_border(&mut text);
    text
}

fn push_border(text: &mut String) {
    for _ in 0..BOARD_WIDTH + 2 {
        text.push('=');
    }
    text.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BOARD_HEIGHT;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_frame_layout() {
        let mut rng = StdRng::seed_from_u64(7);
        let game = Game::new(false, &mut rng);

        let text = frame_text(&game);
        let lines: Vec<&str> = text.split("\r\n").filter(|line| !line.is_empty()).collect();
        let border = "=".repeat(BOARD_WIDTH + 2);

        assert_eq!(lines.len(), 2 + BOARD_HEIGHT + 1);
        assert_eq!(lines[0], "Snake CLI - lvl 1");
        assert_eq!(lines[1], border);
        assert_eq!(lines[lines.len() - 1], border);

        for row in &lines[2..2 + BOARD_HEIGHT] {
            assert_eq!(row.len(), BOARD_WIDTH + 2);
            assert!(row.starts_with('|'));
            assert!(row.ends_with('|'));
        }
    }

    #[test]
    fn test_frame_shows_the_stacked_snake_as_one_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let game = Game::new(false, &mut rng);

        let text = frame_text(&game);

        // All initial segments share the center cell; the apple may be
        // hidden underneath it
        assert_eq!(text.matches(SNAKE_CHAR).count(), 1);
        assert!(text.matches(APPLE_CHAR).count() <= 1);
    }
}
