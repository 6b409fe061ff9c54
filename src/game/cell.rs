use crate::graphics::{Argb, P2};

pub const SNAKE_COLOR: Argb = 0xFF_00_FF_00;
pub const VACANT_COLOR: Argb = SNAKE_COLOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    Vacant,
    SnakeBody,
    Fruit,
}

/// One grid position.
///
/// Cells are only ever created by [`Grid`](super::Grid), which also fixes
/// their screen position. Afterwards only the occupancy and color change.
#[derive(Debug, Clone)]
pub struct Cell {
    kind: Occupancy,
    color: Argb,
    position: P2,
}

impl Cell {
    pub(super) fn new(position: P2) -> Self {
        Self {
            kind: Occupancy::Vacant,
            color: VACANT_COLOR,
            position,
        }
    }

    pub fn kind(&self) -> Occupancy {
        self.kind
    }

    pub fn color(&self) -> Argb {
        self.color
    }

    /// Pixel coordinates of the top-left corner.
    pub fn position(&self) -> P2 {
        self.position
    }

    #[inline]
    pub fn is_vacant(&self) -> bool {
        self.kind == Occupancy::Vacant
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        !self.is_vacant()
    }

    pub fn vacate(&mut self) {
        self.kind = Occupancy::Vacant;
        self.color = VACANT_COLOR;
    }

    pub fn occupy_snake(&mut self) {
        self.kind = Occupancy::SnakeBody;
        self.color = SNAKE_COLOR;
    }

    pub fn occupy_fruit(&mut self, color: Argb) {
        self.kind = Occupancy::Fruit;
        self.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_sets_matching_color() {
        let mut cell = Cell::new(P2(12, 8));
        assert!(cell.is_vacant());

        cell.occupy_fruit(0xFF_FF_00_00);
        assert_eq!(cell.kind(), Occupancy::Fruit);
        assert_eq!(cell.color(), 0xFF_FF_00_00);
        assert!(cell.is_occupied());

        cell.occupy_snake();
        assert_eq!(cell.color(), SNAKE_COLOR);

        cell.vacate();
        assert_eq!(cell.kind(), Occupancy::Vacant);
        assert_eq!(cell.position(), P2(12, 8));
    }
}
