use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Cell, Snake};

/// How a new food cell is chosen.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum FoodPlacement {
    /// Uniform over the whole grid, snake body included.
    #[default]
    Anywhere,
    /// Uniform over cells the snake does not occupy.
    AvoidSnake,
}

/// Food entity currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Cell,
}

impl Food {
    #[must_use]
    pub fn new(position: Cell) -> Self {
        Self { position }
    }

    /// Spawns food according to `placement`.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        placement: FoodPlacement,
    ) -> Self {
        let position = match placement {
            FoodPlacement::Anywhere => random_cell(rng, bounds),
            FoodPlacement::AvoidSnake => {
                free_cell(rng, bounds, snake).unwrap_or_else(|| random_cell(rng, bounds))
            }
        };

        Self::new(position)
    }
}

/// Picks a uniformly random cell in `[0, rows) x [0, cols)`.
#[must_use]
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Cell {
    Cell::new(
        rng.gen_range(0..i32::from(bounds.rows)),
        rng.gen_range(0..i32::from(bounds.cols)),
    )
}

/// Picks a random cell not occupied by the snake, or `None` when the board is full.
#[must_use]
pub fn free_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Cell> {
    let mut candidates = Vec::with_capacity(bounds.total_cells());

    for row in 0..i32::from(bounds.rows) {
        for col in 0..i32::from(bounds.cols) {
            let cell = Cell::new(row, col);
            if !snake.occupies(cell) {
                candidates.push(cell);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
