//! Whole-game scenarios on the default 19x15 board.

use rand::{rngs::StdRng, SeedableRng};

use super::*;

fn board() -> Grid {
    Layout::default().build().unwrap()
}

#[test]
fn three_steps_right_from_two_zero() {
    let mut grid = board();
    let mut snake = Snake::new(&mut grid, Pos::new(2, 0)).unwrap();
    snake.set_direction(Direction::Right).unwrap();

    for _ in 0..3 {
        assert_eq!(snake.step(&mut grid), Ok(Step::Moved));
    }

    assert_eq!(snake.head(), Pos::new(5, 0));
    assert!((2..5).all(|x| grid.at(x, 0).unwrap().is_vacant()));
}

#[test]
fn eat_spawned_fruit_then_hit_the_wall() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut grid = Grid::new(4, 1, crate::graphics::P2(0, 0), 10, (40, 10)).unwrap();
    let mut snake = Snake::new(&mut grid, Pos::new(0, 0)).unwrap();
    snake.set_direction(Direction::Right).unwrap();

    // Three vacant cells, fill them all with fruit.
    for _ in 0..3 {
        spawn_fruit(&mut grid, &mut rng).unwrap();
    }
    assert_eq!(spawn_fruit(&mut grid, &mut rng), Err(SpawnError::GridFull));

    for len in 2..=4 {
        assert_eq!(snake.step(&mut grid), Ok(Step::Ate));
        assert_eq!(snake.len(), len);
    }

    assert_eq!(grid.vacant_count(), 0);
    assert_eq!(snake.step(&mut grid), Err(SnakeError::OutOfBounds));
    assert_eq!(snake.len(), 4);
}

#[test]
fn snake_cells_always_match_the_grid() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut grid = board();
    let mut snake = Snake::new(&mut grid, Pos::new(0, 0)).unwrap();

    // Sweep rows in a zigzag while fruit keeps appearing.
    let mut heading = Direction::Right;
    snake.set_direction(heading).unwrap();

    for turn in 0..60 {
        if turn % 4 == 0 {
            let _ = spawn_fruit(&mut grid, &mut rng);
        }

        match snake.step(&mut grid) {
            Ok(_) => {}
            Err(SnakeError::OutOfBounds) => {
                snake.set_direction(Direction::Down).unwrap();
                if snake.step(&mut grid).is_err() {
                    break;
                }
                heading = heading.opposite();
                snake.set_direction(heading).unwrap();
            }
            Err(_) => break,
        }

        let body: Vec<Pos> = snake.segments().collect();
        for (i, p) in body.iter().enumerate() {
            assert_eq!(grid.cell(*p).unwrap().kind(), Occupancy::SnakeBody);
            assert!(!body[i + 1..].contains(p));
        }

        let snake_cells = grid
            .cells()
            .filter(|c| c.kind() == Occupancy::SnakeBody)
            .count();
        assert_eq!(snake_cells, snake.len());
    }
}
