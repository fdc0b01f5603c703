use std::io;

use crate::game::Game;

/// Drawing strategy for the board plus level readout. Which implementation
/// gets built is decided by the `tui` and `plain` cargo features; game logic
/// never diverges between the two.
pub trait Renderer {
    fn draw(&mut self, game: &Game) -> io::Result<()>;

    /// Runs once after the loop ends on a normal game outcome (death or
    /// quit), before the terminal is restored.
    fn farewell(&mut self, game: &Game) -> io::Result<()> {
        let _ = game;
        Ok(())
    }
}
