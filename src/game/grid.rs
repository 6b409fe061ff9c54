use std::{
    fmt,
    ops::{Index, IndexMut},
};

use super::cell::Cell;
use crate::graphics::P2;

/// Grid coordinate, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Adds a signed offset, `None` when either axis would go negative.
    pub fn offset(self, (dx, dy): (isize, isize)) -> Option<Pos> {
        Some(Pos {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl From<(usize, usize)> for Pos {
    fn from((x, y): (usize, usize)) -> Self {
        Pos { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    NoRoom,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::NoRoom => f.write_str("the viewport cannot fit a single cell"),
        }
    }
}

impl std::error::Error for GridError {}

#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cell_len: u16,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a `width` x `height` grid whose first cell sits at `origin`.
    ///
    /// The requested size is clipped to the number of whole cells that fit
    /// between `origin` and the edge of `viewport`, so every cell has an
    /// on-screen position.
    pub fn new(
        width: usize,
        height: usize,
        origin: P2,
        cell_len: u16,
        viewport: (u16, u16),
    ) -> Result<Self, GridError> {
        if cell_len == 0 {
            return Err(GridError::NoRoom);
        }

        let fit = |extent: u16, start: i32| {
            let room = (extent as i32 - start.max(0)).max(0) as usize;
            room / cell_len as usize
        };

        let width = width.min(fit(viewport.0, origin.0));
        let height = height.min(fit(viewport.1, origin.1));

        if width == 0 || height == 0 {
            return Err(GridError::NoRoom);
        }

        let len = cell_len as i32;
        let mut cells = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(P2(
                    origin.0 + x as i32 * len,
                    origin.1 + y as i32 * len,
                )));
            }
        }

        Ok(Self {
            width,
            height,
            cell_len,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell_len(&self) -> u16 {
        self.cell_len
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn index_of(&self, pos: Pos) -> Option<usize> {
        self.contains(pos).then(|| pos.x + pos.y * self.width)
    }

    pub fn pos_of(&self, index: usize) -> Option<Pos> {
        (index < self.len()).then(|| Pos::new(index % self.width, index / self.width))
    }

    pub fn at(&self, x: usize, y: usize) -> Option<&Cell> {
        self.index_of(Pos::new(x, y)).map(|i| &self.cells[i])
    }

    pub fn at_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        self.index_of(Pos::new(x, y)).map(|i| &mut self.cells[i])
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.at(pos.x, pos.y)
    }

    pub fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        self.at_mut(pos.x, pos.y)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn vacant_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_vacant()).count()
    }
}

impl Index<usize> for Grid {
    type Output = Cell;

    #[inline]
    fn index(&self, i: usize) -> &Cell {
        &self.cells[i]
    }
}

impl IndexMut<usize> for Grid {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Cell {
        &mut self.cells[i]
    }
}
