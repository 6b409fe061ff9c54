use std::time::Duration;

use log::{debug, info, warn};
use rand::Rng;

use super::{
    fruit::spawn_fruit,
    grid::{Grid, GridError},
    snake::{Direction, Snake, SnakeError, Step},
};
use crate::graphics::P2;

pub const TITLE: &str = "Snek";

pub const DEFAULT_MOVE_INTERVAL: Duration = Duration::from_millis(250);
pub const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_secs(5);

/// Where and how large the grid is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cells: (usize, usize),
    pub origin: P2,
    pub cell_len: u16,
    pub viewport: (u16, u16),
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cells: (19, 15),
            origin: P2(12, 8),
            cell_len: 25,
            viewport: (500, 400),
        }
    }
}

impl Layout {
    pub fn build(&self) -> Result<Grid, GridError> {
        Grid::new(
            self.cells.0,
            self.cells.1,
            self.origin,
            self.cell_len,
            self.viewport,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub move_interval: Duration,
    pub spawn_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            move_interval: DEFAULT_MOVE_INTERVAL,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    OutOfBounds,
    Collision,
}

impl EndReason {
    fn from_error(err: &SnakeError) -> Option<Self> {
        match err {
            SnakeError::OutOfBounds => Some(EndReason::OutOfBounds),
            SnakeError::Collision => Some(EndReason::Collision),
            SnakeError::Reversal(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for the first heading.
    Start,
    InProgress,
    /// Terminal for the run.
    End(EndReason),
}

/// One run of the game: the grid, the snake living in it and the timers
/// that drive both.
pub struct Session {
    layout: Layout,
    timing: Timing,

    grid: Grid,
    snake: Snake,
    state: GameState,

    movement: Duration,
    spawn: Duration,

    score: usize,
    title: String,
    title_changed: bool,
}

impl Session {
    pub fn new<R: Rng + ?Sized>(
        layout: Layout,
        timing: Timing,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let mut grid = layout.build()?;
        let snake = Snake::spawn(&mut grid, rng).ok_or(GridError::NoRoom)?;

        debug!("Snake starts at {:?}", snake.head());

        Ok(Self {
            layout,
            timing,
            grid,
            snake,
            state: GameState::Start,
            movement: Duration::ZERO,
            spawn: Duration::ZERO,
            score: 0,
            title: TITLE.to_owned(),
            title_changed: true,
        })
    }

    /// Builds a session around an already placed snake.
    #[cfg(test)]
    pub(crate) fn with_snake(layout: Layout, timing: Timing, grid: Grid, snake: Snake) -> Self {
        let state = if snake.has_heading() {
            GameState::InProgress
        } else {
            GameState::Start
        };

        Self {
            layout,
            timing,
            grid,
            snake,
            state,
            movement: Duration::ZERO,
            spawn: Duration::ZERO,
            score: 0,
            title: TITLE.to_owned(),
            title_changed: true,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the title if it changed since the last call.
    pub fn take_title(&mut self) -> Option<&str> {
        if !self.title_changed {
            return None;
        }

        self.title_changed = false;
        Some(&self.title)
    }

    fn set_title(&mut self, title: String) {
        if title != self.title {
            self.title = title;
            self.title_changed = true;
        }
    }

    pub fn steer(&mut self, direction: Direction) {
        if let GameState::End(_) = self.state {
            return;
        }

        match self.snake.set_direction(direction) {
            Ok(()) => {
                if self.state == GameState::Start {
                    info!("Game started, heading {:?}", direction);
                    self.state = GameState::InProgress;
                }
            }

            Err(err) => {
                debug!("Rejected heading {:?}", direction);
                self.set_title(format!("{}: {}", TITLE, err));
            }
        }
    }

    /// Discards the current run and starts a new one.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GridError> {
        *self = Self::new(self.layout, self.timing, rng)?;

        info!("Game restarted");

        Ok(())
    }

    /// Feeds `dt` of wall-clock time into the timers.
    ///
    /// Returns true when the grid changed.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: Duration, rng: &mut R) -> bool {
        if self.state != GameState::InProgress {
            return false;
        }

        self.movement += dt;
        self.spawn += dt;

        let mut changed = false;

        if self.spawn >= self.timing.spawn_interval {
            match spawn_fruit(&mut self.grid, rng) {
                Ok(index) => {
                    debug!("Fruit spawned at {:?}", self.grid.pos_of(index));
                    changed = true;
                }
                Err(err) => warn!("{}", err),
            }

            self.spawn = Duration::ZERO;
        }

        if self.movement >= self.timing.move_interval {
            match self.snake.step(&mut self.grid) {
                Ok(Step::Ate) => {
                    self.score += 1;
                    debug!("Fruit eaten, length {}", self.snake.len());
                    changed = true;
                }

                Ok(Step::Moved) => changed = true,

                Ok(Step::Idle) => {}

                Err(err) => self.end(err),
            }

            self.movement = Duration::ZERO;
        }

        changed
    }

    fn end(&mut self, err: SnakeError) {
        let Some(reason) = EndReason::from_error(&err) else {
            return;
        };

        info!("Game over: {}. Score: {}", err, self.score);

        self.state = GameState::End(reason);
        self.set_title(format!("{}: {} - over!", TITLE, err));
    }
}
