use std::{collections::VecDeque, fmt};

use rand::Rng;

use super::{
    cell::Occupancy,
    grid::{Grid, Pos},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit vector, y grows downwards.
    #[inline]
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakeError {
    Reversal(Direction),
    OutOfBounds,
    Collision,
}

impl fmt::Display for SnakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnakeError::Reversal(_) => f.write_str("cannot turn the opposite direction"),
            SnakeError::Collision => f.write_str("collided with the snake's own body"),
            SnakeError::OutOfBounds => f.write_str("cannot go outside the eating-ground"),
        }
    }
}

impl std::error::Error for SnakeError {}

/// What a successful step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No heading yet.
    Idle,
    Moved,
    Ate,
}

/// Head-first list of occupied cells.
///
/// The snake does not keep a handle on the grid it lives in; every
/// operation that touches cells takes the grid explicitly. The grid cell
/// under every segment is kept in the `SnakeBody` state.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Pos>,
    heading: Option<Direction>,
}

impl Snake {
    pub fn new(grid: &mut Grid, head: Pos) -> Result<Self, SnakeError> {
        let cell = grid.cell_mut(head).ok_or(SnakeError::OutOfBounds)?;

        if cell.is_occupied() {
            return Err(SnakeError::Collision);
        }

        cell.occupy_snake();

        Ok(Self {
            body: VecDeque::from([head]),
            heading: None,
        })
    }

    /// Places a length-1 snake on a uniformly chosen vacant cell.
    ///
    /// Returns `None` when the grid has no vacant cell left.
    pub fn spawn<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<Self> {
        let vacant = grid.vacant_count();

        if vacant == 0 {
            return None;
        }

        let nth = rng.gen_range(0..vacant);
        let index = grid
            .cells()
            .enumerate()
            .filter(|(_, c)| c.is_vacant())
            .nth(nth)
            .map(|(i, _)| i)?;

        let head = grid.pos_of(index)?;

        Self::new(grid, head).ok()
    }

    pub fn head(&self) -> Pos {
        self.body[0]
    }

    pub fn tail(&self) -> Pos {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false, a snake keeps at least its head.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = Pos> + '_ {
        self.body.iter().copied()
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    #[inline]
    pub fn has_heading(&self) -> bool {
        self.heading.is_some()
    }

    pub fn set_direction(&mut self, new: Direction) -> Result<(), SnakeError> {
        if self.heading == Some(new.opposite()) {
            return Err(SnakeError::Reversal(new));
        }

        self.heading = Some(new);

        Ok(())
    }

    /// Advances the snake one cell along its heading.
    ///
    /// Failures leave both the snake and the grid untouched.
    pub fn step(&mut self, grid: &mut Grid) -> Result<Step, SnakeError> {
        let Some(heading) = self.heading else {
            return Ok(Step::Idle);
        };

        let target = self
            .head()
            .offset(heading.offset())
            .filter(|&p| grid.contains(p))
            .ok_or(SnakeError::OutOfBounds)?;

        let kind = grid
            .cell(target)
            .map(|c| c.kind())
            .ok_or(SnakeError::OutOfBounds)?;

        let ate = kind == Occupancy::Fruit;

        // The tail leaves its cell on this step, so chasing it is allowed.
        // At length 2 the tail is the neck and entering it is a reversal.
        if kind == Occupancy::SnakeBody && (target != self.tail() || self.body.len() <= 2) {
            return Err(SnakeError::Collision);
        }

        let old_tail = self.tail();

        if !ate {
            self.body.pop_back();
            if let Some(cell) = grid.cell_mut(old_tail) {
                cell.vacate();
            }
        }

        self.body.push_front(target);
        if let Some(cell) = grid.cell_mut(target) {
            cell.occupy_snake();
        }

        if ate {
            Ok(Step::Ate)
        } else {
            Ok(Step::Moved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::P2;
    use rand::{rngs::StdRng, SeedableRng};

    fn grid() -> Grid {
        Grid::new(19, 15, P2(12, 8), 25, (500, 400)).unwrap()
    }

    fn kind(grid: &Grid, x: usize, y: usize) -> Occupancy {
        grid.at(x, y).unwrap().kind()
    }

    /// Lays out a snake head-first, marking the grid as it goes.
    fn snake_at(grid: &mut Grid, cells: &[(usize, usize)], heading: Direction) -> Snake {
        let mut snake = Snake::new(grid, cells[0].into()).unwrap();
        for &(x, y) in &cells[1..] {
            grid.at_mut(x, y).unwrap().occupy_snake();
            snake.body.push_back(Pos::new(x, y));
        }
        snake.heading = Some(heading);
        snake
    }

    #[test]
    fn reversal_is_rejected() {
        let mut grid = grid();
        let mut snake = Snake::new(&mut grid, Pos::new(5, 5)).unwrap();

        snake.set_direction(Direction::Right).unwrap();
        assert_eq!(
            snake.set_direction(Direction::Left),
            Err(SnakeError::Reversal(Direction::Left))
        );
        assert_eq!(snake.heading(), Some(Direction::Right));

        snake.set_direction(Direction::Right).unwrap();
        snake.set_direction(Direction::Up).unwrap();
        assert!(snake.set_direction(Direction::Down).is_err());
        assert_eq!(snake.heading(), Some(Direction::Up));
    }

    #[test]
    fn any_first_heading_is_accepted() {
        let mut grid = grid();
        let mut snake = Snake::new(&mut grid, Pos::new(5, 5)).unwrap();

        assert!(!snake.has_heading());
        assert_eq!(snake.step(&mut grid), Ok(Step::Idle));
        snake.set_direction(Direction::Left).unwrap();
        assert!(snake.has_heading());
    }

    #[test]
    fn single_cell_move_vacates_old_cell() {
        let mut grid = grid();
        let mut snake = snake_at(&mut grid, &[(4, 4)], Direction::Down);

        assert_eq!(snake.step(&mut grid), Ok(Step::Moved));
        assert_eq!(snake.head(), Pos::new(4, 5));
        assert_eq!(kind(&grid, 4, 4), Occupancy::Vacant);
        assert_eq!(kind(&grid, 4, 5), Occupancy::SnakeBody);
    }

    #[test]
    fn three_moves_right() {
        let mut grid = grid();
        let mut snake = snake_at(&mut grid, &[(2, 0)], Direction::Right);

        for _ in 0..3 {
            snake.step(&mut grid).unwrap();
        }

        assert_eq!(snake.head(), Pos::new(5, 0));
        assert_eq!(snake.len(), 1);
        for x in 2..5 {
            assert_eq!(kind(&grid, x, 0), Occupancy::Vacant);
        }
        assert_eq!(kind(&grid, 5, 0), Occupancy::SnakeBody);
    }

    #[test]
    fn eating_grows_by_one() {
        let mut grid = grid();
        let mut snake = snake_at(&mut grid, &[(1, 0), (0, 0)], Direction::Right);
        grid.at_mut(2, 0).unwrap().occupy_fruit(0xFF_00_00_FF);

        assert_eq!(snake.step(&mut grid), Ok(Step::Ate));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Pos::new(2, 0));
        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            [Pos::new(2, 0), Pos::new(1, 0), Pos::new(0, 0)]
        );
        for x in 0..3 {
            assert_eq!(kind(&grid, x, 0), Occupancy::SnakeBody);
        }
        assert_eq!(grid.at(2, 0).unwrap().color(), crate::game::cell::SNAKE_COLOR);
    }

    #[test]
    fn growth_after_turn_follows_the_path() {
        let mut grid = grid();
        // L shape: head at (3,3), body bends at (2,3), tail at (2,2).
        let mut snake = snake_at(&mut grid, &[(3, 3), (2, 3), (2, 2)], Direction::Down);
        grid.at_mut(3, 4).unwrap().occupy_fruit(0xFF_FF_00_00);

        assert_eq!(snake.step(&mut grid), Ok(Step::Ate));
        assert_eq!(snake.tail(), Pos::new(2, 2));
        assert_eq!(snake.len(), 4);
        assert_eq!(grid.vacant_count(), grid.len() - 4);
    }

    #[test]
    fn leaving_the_grid_fails_without_change() {
        let mut grid = grid();
        let mut snake = snake_at(&mut grid, &[(18, 3), (17, 3)], Direction::Right);

        assert_eq!(snake.step(&mut grid), Err(SnakeError::OutOfBounds));
        assert_eq!(snake.segments().collect::<Vec<_>>(), [Pos::new(18, 3), Pos::new(17, 3)]);
        assert_eq!(kind(&grid, 18, 3), Occupancy::SnakeBody);
        assert_eq!(kind(&grid, 17, 3), Occupancy::SnakeBody);

        let mut snake = snake_at(&mut grid, &[(0, 14)], Direction::Down);
        assert_eq!(snake.step(&mut grid), Err(SnakeError::OutOfBounds));

        let mut snake = snake_at(&mut grid, &[(0, 0)], Direction::Up);
        assert_eq!(snake.step(&mut grid), Err(SnakeError::OutOfBounds));
        assert_eq!(snake.head(), Pos::new(0, 0));
    }

    #[test]
    fn running_into_the_body_fails() {
        let mut grid = grid();
        // Head at (5,5) heading Up into (5,4), which is mid-body.
        let mut snake = snake_at(
            &mut grid,
            &[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)],
            Direction::Up,
        );

        assert_eq!(snake.step(&mut grid), Err(SnakeError::Collision));
        assert_eq!(snake.head(), Pos::new(5, 5));
        assert_eq!(snake.len(), 5);
        assert_eq!(grid.vacant_count(), grid.len() - 5);
    }

    #[test]
    fn chasing_the_tail_is_allowed() {
        let mut grid = grid();
        // A 2x2 loop: the head moves into the cell the tail is leaving.
        let mut snake = snake_at(&mut grid, &[(5, 5), (6, 5), (6, 4), (5, 4)], Direction::Up);

        assert_eq!(snake.step(&mut grid), Ok(Step::Moved));
        assert_eq!(snake.head(), Pos::new(5, 4));
        assert_eq!(snake.tail(), Pos::new(6, 4));
        assert_eq!(kind(&grid, 5, 4), Occupancy::SnakeBody);
        assert_eq!(grid.vacant_count(), grid.len() - 4);
    }

    #[test]
    fn two_turns_in_one_tick_cannot_fold_a_short_snake() {
        let mut grid = grid();
        let mut snake = Snake::new(&mut grid, Pos::new(1, 0)).unwrap();
        snake.set_direction(Direction::Down).unwrap();
        grid.at_mut(1, 1).unwrap().occupy_fruit(0xFF_FF_00_00);
        assert_eq!(snake.step(&mut grid), Ok(Step::Ate));

        // Left then Up before the next step points the head at the neck.
        snake.set_direction(Direction::Left).unwrap();
        snake.set_direction(Direction::Up).unwrap();

        assert_eq!(snake.step(&mut grid), Err(SnakeError::Collision));
        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            [Pos::new(1, 1), Pos::new(1, 0)]
        );
        assert_eq!(kind(&grid, 1, 0), Occupancy::SnakeBody);
        assert_eq!(kind(&grid, 1, 1), Occupancy::SnakeBody);
    }

    #[test]
    fn new_rejects_bad_cells() {
        let mut grid = grid();

        assert_eq!(
            Snake::new(&mut grid, Pos::new(19, 0)).unwrap_err(),
            SnakeError::OutOfBounds
        );

        grid.at_mut(1, 1).unwrap().occupy_fruit(0xFF_FF_00_00);
        assert_eq!(
            Snake::new(&mut grid, Pos::new(1, 1)).unwrap_err(),
            SnakeError::Collision
        );
    }

    #[test]
    fn spawn_lands_on_a_vacant_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(2, 1, P2(0, 0), 10, (100, 100)).unwrap();
        grid.at_mut(0, 0).unwrap().occupy_fruit(0xFF_FF_00_00);

        let snake = Snake::spawn(&mut grid, &mut rng).unwrap();
        assert_eq!(snake.head(), Pos::new(1, 0));
        assert_eq!(kind(&grid, 1, 0), Occupancy::SnakeBody);

        assert!(Snake::spawn(&mut grid, &mut rng).is_none());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            SnakeError::Reversal(Direction::Up).to_string(),
            "cannot turn the opposite direction"
        );
        assert_eq!(
            SnakeError::Collision.to_string(),
            "collided with the snake's own body"
        );
    }
}
