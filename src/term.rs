use std::io;

use crossterm::terminal;
use log::error;

/// Puts the terminal into raw mode for its own lifetime. Dropping restores
/// the previous mode on every exit path: normal return, quit, death,
/// interrupt, and panic unwind alike.
pub struct RawGuard;

impl RawGuard {
    pub fn enable() -> io::Result<RawGuard> {
        terminal::enable_raw_mode()?;
        Ok(RawGuard)
    }
}

impl Drop for RawGuard {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            error!("Failed to restore terminal mode: {err}");
        }
    }
}
