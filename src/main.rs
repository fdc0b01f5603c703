mod game;
mod input;
mod render;
mod snake;
mod term;

#[cfg(any(feature = "plain", not(feature = "tui")))]
mod ansi;
#[cfg(all(feature = "tui", not(feature = "plain")))]
mod tui;

use std::env;
use std::fs::File;
use std::io;
use std::process::ExitCode;
use std::thread::sleep;

use log::{info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::game::{Game, Status};
use crate::input::Command;
use crate::render::Renderer;
use crate::term::RawGuard;

const LOG_FILE: &str = "snake.log";

#[cfg(all(feature = "tui", not(feature = "plain")))]
const EXIT_TOO_SHORT: u8 = 1;
#[cfg(all(feature = "tui", not(feature = "plain")))]
const EXIT_TOO_NARROW: u8 = 2;
const EXIT_INTERRUPTED: u8 = 3;

enum Outcome {
    Played,
    Interrupted,
}

fn main() -> ExitCode {
    if let Err(err) = init_logging() {
        eprintln!("Failed to set up logging: {err}");
        return ExitCode::FAILURE;
    }

    // A single positional argument, value ignored, makes the board toroidal
    let wrap = env::args().nth(1).is_some();
    info!("Starting Snake CLI (wrap: {wrap})");

    #[cfg(all(feature = "tui", not(feature = "plain")))]
    if let Some(code) = undersized_terminal() {
        return code;
    }

    match run(wrap) {
        Ok(Outcome::Played) => ExitCode::SUCCESS,
        Ok(Outcome::Interrupted) => {
            warn!("Interrupted, exiting");
            ExitCode::from(EXIT_INTERRUPTED)
        }
        Err(err) => {
            eprintln!("Terminal error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() -> io::Result<()> {
    // Set up logging before anything else; stdout belongs to the game, so
    // the log goes to a file
    WriteLogger::init(LevelFilter::Info, Config::default(), File::create(LOG_FILE)?)
        .expect("Failed to initialize logger");
    Ok(())
}

/// The windowed display refuses to start in a terminal smaller than the
/// board. Checked before entering raw mode, so the message prints normally.
#[cfg(all(feature = "tui", not(feature = "plain")))]
fn undersized_terminal() -> Option<ExitCode> {
    let Ok((width, height)) = crossterm::terminal::size() else {
        return None;
    };

    if height < tui::MIN_HEIGHT {
        eprintln!("Terminal too short: need at least {} rows", tui::MIN_HEIGHT);
        return Some(ExitCode::from(EXIT_TOO_SHORT));
    }
    if width < tui::MIN_WIDTH {
        eprintln!("Terminal too narrow: need at least {} columns", tui::MIN_WIDTH);
        return Some(ExitCode::from(EXIT_TOO_NARROW));
    }
    None
}

fn run(wrap: bool) -> io::Result<Outcome> {
    let mut rng = rand::thread_rng();
    let mut game = Game::new(wrap, &mut rng);

    let _raw = RawGuard::enable()?;

    #[cfg(all(feature = "tui", not(feature = "plain")))]
    let mut renderer = tui::TuiRenderer::new()?;
    #[cfg(any(feature = "plain", not(feature = "tui")))]
    let mut renderer = ansi::AnsiRenderer::new()?;

    let outcome = loop {
        match input::poll_command() {
            Some(Command::Interrupt) => break Outcome::Interrupted,
            Some(Command::Quit) => game.quit(),
            Some(Command::Turn(direction)) => game.steer(direction),
            None => {}
        }

        game.step(&mut rng);
        renderer.draw(&game)?;

        match game.status() {
            Status::Running => sleep(game.tick_interval()),
            // The terminated frame is drawn but the loop stops here
            Status::Dead | Status::Quit => break Outcome::Played,
        }
    };

    if let Outcome::Played = outcome {
        info!("Game over: {:?} at level {}", game.status(), game.level());
        renderer.farewell(&game)?;
    }

    Ok(outcome)
}
