use std::time::Duration;

use log::info;
use rand::Rng;

use crate::snake::{Direction, Pos, Snake};

pub const BOARD_WIDTH: usize = 50;
pub const BOARD_HEIGHT: usize = 20;
pub const INITIAL_SIZE: usize = 5;
pub const FPS: u64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Apple,
    Snake,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Dead,
    Quit,
}

/// What a single tick amounted to. A running tick is always exactly one of
/// `Moved`, `Ate` or `Died`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    Halted,
    Moved,
    Ate,
    Died,
}

pub struct Game {
    board: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
    snake: Snake,
    apple: Pos,
    level: u64,
    direction: Option<Direction>,
    status: Status,
    wrap: bool,
}

impl Game {
    pub fn new(wrap: bool, rng: &mut impl Rng) -> Self {
        let center = Pos {
            x: BOARD_WIDTH as i32 / 2,
            y: BOARD_HEIGHT as i32 / 2,
        };
        let mut game = Game {
            board: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
            snake: Snake::new(center, BOARD_WIDTH * BOARD_HEIGHT, INITIAL_SIZE),
            apple: random_apple(rng),
            level: 1,
            direction: None,
            status: Status::Running,
            wrap,
        };

        // The fresh body is stacked on a single cell, so the overlap scan is
        // meaningless until the snake has moved.
        game.rebuild_board();
        game
    }

    /// Advance the game by one tick. Does nothing while halted or once the
    /// game is over.
    pub fn step(&mut self, rng: &mut impl Rng) -> StepResult {
        if self.status != Status::Running {
            return StepResult::Halted;
        }
        let Some(direction) = self.direction else {
            return StepResult::Halted;
        };

        let mut next = self.snake.head().offset(direction.into());
        let mut ate = false;

        // The apple always sits in bounds, so an eating move never needs the
        // boundary check.
        if next == self.apple {
            self.level += 1;
            self.apple = random_apple(rng);
            ate = true;
            info!("Apple eaten, level is now {}", self.level);
        } else if !next.in_bounds(BOARD_WIDTH as i32, BOARD_HEIGHT as i32) {
            if self.wrap {
                next = next.wrapped(BOARD_WIDTH as i32, BOARD_HEIGHT as i32);
            } else {
                self.status = Status::Dead;
                return StepResult::Died;
            }
        }

        self.snake.advance(next);
        if self.rebuild_board() {
            self.status = Status::Dead;
            return StepResult::Died;
        }

        if ate {
            StepResult::Ate
        } else {
            StepResult::Moved
        }
    }

    /// Change course. The exact opposite of the current direction is
    /// rejected; turning into your own neck would be an instant collision.
    pub fn steer(&mut self, new_direction: Direction) {
        if self.direction == Some(new_direction.opposite()) {
            return;
        }
        self.direction = Some(new_direction);
    }

    pub fn quit(&mut self) {
        if self.status == Status::Running {
            self.status = Status::Quit;
        }
    }

    /// Frames speed up as the level climbs.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / (FPS + self.level))
    }

    pub fn length(&self) -> usize {
        INITIAL_SIZE + self.level as usize - 1
    }

    pub fn board(&self) -> &[[Cell; BOARD_WIDTH]; BOARD_HEIGHT] {
        &self.board
    }

    pub fn level(&self) -> u64 {
        self.level
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Recompute every cell from the apple and the live body, newest segment
    /// first. Returns true when a non-head segment sits on the head cell.
    /// The snake stamps over the apple, so an apple spawned under the body
    /// stays hidden until the tail slides off it.
    fn rebuild_board(&mut self) -> bool {
        self.board = [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
        self.board[self.apple.y as usize][self.apple.x as usize] = Cell::Apple;

        let head = self.snake.head();
        let mut collided = false;
        for (i, pos) in self.snake.recent(self.length()).enumerate() {
            self.board[pos.y as usize][pos.x as usize] = Cell::Snake;
            if i != 0 && pos == head {
                collided = true;
            }
        }
        collided
    }
}

/// Uniform over the whole grid, with no occupancy exclusion: the apple may
/// land inside the snake and be uncollectable until the body moves away.
fn random_apple(rng: &mut impl Rng) -> Pos {
    Pos {
        x: rng.gen_range(0..BOARD_WIDTH as i32),
        y: rng.gen_range(0..BOARD_HEIGHT as i32),
    }
}
