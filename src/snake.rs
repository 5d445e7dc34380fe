use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Signed so that a head stepping off the board is still representable
/// long enough to be rejected by the bounds check.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns true when the cell lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.row >= 0
            && self.col >= 0
            && self.row < i32::from(bounds.rows)
            && self.col < i32::from(bounds.cols)
    }

    /// Returns the neighbouring cell one unit along `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Left => Self::new(self.row, self.col - 1),
            Direction::Right => Self::new(self.row, self.col + 1),
            Direction::Up => Self::new(self.row - 1, self.col),
            Direction::Down => Self::new(self.row + 1, self.col),
        }
    }
}

/// Snake body ordered from head to tail.
///
/// Segments may overlap; nothing here checks for self-intersection.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Cell) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Pushes `head` to the front, dropping the tail unless `grow` is set.
    pub fn advance(&mut self, head: Cell, grow: bool) {
        self.body.push_front(head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Cell {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Cell> + ExactSizeIterator {
        self.body.iter()
    }
}
