use std::fmt;

use rand::{seq::SliceRandom, Rng};

use super::grid::Grid;
use crate::graphics::Argb;

pub const FRUIT_PALETTE: [Argb; 3] = [
    0xFF_FF_00_00,
    0xFF_00_00_FF,
    // Orange.
    0xFF_FF_A5_00,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    GridFull,
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::GridFull => f.write_str("no vacant cell left for fruit"),
        }
    }
}

impl std::error::Error for SpawnError {}

pub fn random_fruit_color<R: Rng + ?Sized>(rng: &mut R) -> Argb {
    *FRUIT_PALETTE.choose(rng).unwrap_or(&FRUIT_PALETTE[0])
}

/// Turns a uniformly chosen vacant cell into fruit and returns its index.
///
/// Uses rejection sampling over the whole grid, which terminates because at
/// least one vacant cell is known to exist.
pub fn spawn_fruit<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Result<usize, SpawnError> {
    if grid.vacant_count() == 0 {
        return Err(SpawnError::GridFull);
    }

    let mut index = rng.gen_range(0..grid.len());

    while grid[index].is_occupied() {
        index = rng.gen_range(0..grid.len());
    }

    let color = random_fruit_color(rng);
    grid[index].occupy_fruit(color);

    Ok(index)
}
