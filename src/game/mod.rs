pub mod cell;
pub mod fruit;
pub mod grid;
pub mod snake;
pub mod state;

#[cfg(test)]
mod tests;

pub use cell::{Cell, Occupancy};
pub use fruit::{spawn_fruit, SpawnError};
pub use grid::{Grid, GridError, Pos};
pub use snake::{Direction, Snake, SnakeError, Step};
pub use state::{EndReason, GameState, Layout, Session, Timing};
