use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{FOOD_POINTS, GridSize, START_CELL};
use crate::food::{Food, FoodPlacement};
use crate::input::Direction;
use crate::snake::{Cell, Snake};

/// Lifecycle state of one game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Signals produced by a tick for collaborators outside the core.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    /// Head reached food; carries the new score.
    FoodEaten { score: u32 },
    /// Score passed the previous best and should be persisted.
    HighScore(u32),
    /// Head left the grid. The game is over.
    Collision { at: Cell },
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Direction,
    pub food: Food,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    bounds: GridSize,
    placement: FoodPlacement,
    events: Vec<GameEvent>,
    rng: StdRng,
}

impl GameState {
    /// Creates a game seeded from system entropy.
    #[must_use]
    pub fn new(bounds: GridSize, high_score: u32) -> Self {
        Self::with_rng(bounds, high_score, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, high_score: u32, seed: u64) -> Self {
        Self::with_rng(bounds, high_score, StdRng::seed_from_u64(seed))
    }

    /// Grids smaller than the minimum playable size are enlarged to it.
    fn with_rng(bounds: GridSize, high_score: u32, mut rng: StdRng) -> Self {
        let bounds = bounds.clamped();
        let snake = start_snake();
        let placement = FoodPlacement::default();
        let food = Food::spawn(&mut rng, bounds, &snake, placement);

        Self {
            snake,
            direction: Direction::Right,
            food,
            score: 0,
            high_score,
            status: GameStatus::Running,
            bounds,
            placement,
            events: Vec::new(),
            rng,
        }
    }

    /// Chooses how future food cells are picked.
    #[must_use]
    pub fn with_food_placement(mut self, placement: FoodPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }

        let new_head = self.snake.head().step(self.direction);
        if !new_head.is_within_bounds(self.bounds) {
            self.status = GameStatus::GameOver;
            self.events.push(GameEvent::Collision { at: new_head });
            return;
        }

        let ate = new_head == self.food.position;
        self.snake.advance(new_head, ate);
        if ate {
            self.score += FOOD_POINTS;
            self.events.push(GameEvent::FoodEaten { score: self.score });

            if self.score > self.high_score {
                self.high_score = self.score;
                self.events.push(GameEvent::HighScore(self.high_score));
            }

            self.food = Food::spawn(&mut self.rng, self.bounds, &self.snake, self.placement);
        }
    }

    /// Returns the game to its start configuration. The high score is kept.
    pub fn reset(&mut self) {
        self.snake = start_snake();
        self.direction = Direction::Right;
        self.score = 0;
        self.status = GameStatus::Running;
        self.events.clear();
        self.food = Food::spawn(&mut self.rng, self.bounds, &self.snake, self.placement);
    }

    /// Overwrites the pending direction. Ignored once the game is over.
    ///
    /// Reversing onto the second segment is allowed.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.status == GameStatus::Running {
            self.direction = direction;
        }
    }

    /// Drains the signals produced since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

fn start_snake() -> Snake {
    Snake::new(Cell::new(START_CELL.0, START_CELL.1))
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::food::{Food, FoodPlacement};
    use crate::input::Direction;
    use crate::snake::{Cell, Snake};

    use super::{GameEvent, GameState, GameStatus};

    const GRID: GridSize = GridSize { rows: 10, cols: 10 };

    fn state_with(snake: Snake, direction: Direction, food: Cell) -> GameState {
        let mut state = GameState::new_with_seed(GRID, 0, 1);
        state.snake = snake;
        state.direction = direction;
        state.food = Food::new(food);
        state
    }

    #[test]
    fn head_moves_one_unit_along_each_direction() {
        for (direction, expected) in [
            (Direction::Left, Cell::new(5, 4)),
            (Direction::Right, Cell::new(5, 6)),
            (Direction::Up, Cell::new(4, 5)),
            (Direction::Down, Cell::new(6, 5)),
        ] {
            let mut state = state_with(Snake::new(Cell::new(5, 5)), Direction::Right, Cell::new(0, 0));

            state.set_direction(direction);
            state.tick();

            assert_eq!(state.snake.head(), expected);
            assert_eq!(state.status, GameStatus::Running);
        }
    }

    #[test]
    fn eating_food_grows_snake_and_scores() {
        let mut state = state_with(Snake::new(Cell::new(2, 2)), Direction::Right, Cell::new(2, 3));

        state.tick();

        let segments: Vec<Cell> = state.snake.segments().copied().collect();
        assert_eq!(segments, vec![Cell::new(2, 3), Cell::new(2, 2)]);
        assert_eq!(state.score, 10);
        assert_eq!(state.high_score, 10);
        assert!(state.food.position.is_within_bounds(GRID));
        assert_eq!(
            state.take_events(),
            vec![GameEvent::FoodEaten { score: 10 }, GameEvent::HighScore(10)]
        );
    }

    #[test]
    fn score_below_high_score_is_not_persisted() {
        let mut state = state_with(Snake::new(Cell::new(2, 2)), Direction::Right, Cell::new(2, 3));
        state.high_score = 50;

        state.tick();

        assert_eq!(state.score, 10);
        assert_eq!(state.high_score, 50);
        assert_eq!(state.take_events(), vec![GameEvent::FoodEaten { score: 10 }]);
    }

    #[test]
    fn score_equal_to_high_score_is_not_persisted() {
        let mut state = state_with(Snake::new(Cell::new(2, 2)), Direction::Right, Cell::new(2, 3));
        state.high_score = 10;

        state.tick();

        assert!(!state.take_events().contains(&GameEvent::HighScore(10)));
    }

    #[test]
    fn normal_move_keeps_length_and_score() {
        let mut state = state_with(
            Snake::from_segments(vec![Cell::new(4, 4), Cell::new(4, 3), Cell::new(4, 2)]),
            Direction::Down,
            Cell::new(0, 0),
        );

        state.tick();

        let segments: Vec<Cell> = state.snake.segments().copied().collect();
        assert_eq!(segments, vec![Cell::new(5, 4), Cell::new(4, 4), Cell::new(4, 3)]);
        assert_eq!(state.score, 0);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn leaving_the_grid_is_game_over_without_mutation() {
        let mut state = state_with(Snake::new(Cell::new(0, 0)), Direction::Up, Cell::new(5, 5));

        state.tick();

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.snake, Snake::new(Cell::new(0, 0)));
        assert_eq!(state.food.position, Cell::new(5, 5));
        assert_eq!(state.score, 0);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::Collision { at: Cell::new(-1, 0) }]
        );
    }

    #[test]
    fn every_wall_ends_the_game() {
        for (start, direction) in [
            (Cell::new(4, 0), Direction::Left),
            (Cell::new(4, 9), Direction::Right),
            (Cell::new(0, 4), Direction::Up),
            (Cell::new(9, 4), Direction::Down),
        ] {
            let mut state = state_with(Snake::new(start), direction, Cell::new(5, 5));

            state.tick();

            assert_eq!(state.status, GameStatus::GameOver, "{direction:?} from {start:?}");
        }
    }

    #[test]
    fn tick_after_game_over_has_no_effect() {
        let mut state = state_with(
            Snake::from_segments(vec![Cell::new(0, 3), Cell::new(0, 2)]),
            Direction::Up,
            Cell::new(5, 5),
        );
        state.score = 30;
        state.high_score = 40;
        state.tick();
        let _ = state.take_events();
        let snapshot = state.snake.clone();

        state.tick();
        state.tick();

        assert_eq!(state.snake, snapshot);
        assert_eq!(state.score, 30);
        assert_eq!(state.high_score, 40);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn direction_is_ignored_after_game_over() {
        let mut state = state_with(Snake::new(Cell::new(0, 0)), Direction::Up, Cell::new(5, 5));
        state.tick();

        state.set_direction(Direction::Down);

        assert_eq!(state.direction, Direction::Up);
    }

    #[test]
    fn reversal_is_accepted() {
        let mut state = state_with(
            Snake::from_segments(vec![Cell::new(2, 3), Cell::new(2, 2)]),
            Direction::Right,
            Cell::new(9, 9),
        );

        state.set_direction(Direction::Left);
        state.tick();

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.snake.head(), Cell::new(2, 2));
    }

    #[test]
    fn reset_restores_start_configuration() {
        let mut state = state_with(
            Snake::from_segments(vec![Cell::new(0, 6), Cell::new(0, 5), Cell::new(0, 4)]),
            Direction::Up,
            Cell::new(5, 5),
        );
        state.score = 70;
        state.high_score = 70;
        state.tick();
        assert!(state.is_game_over());

        state.reset();

        assert_eq!(state.snake, Snake::new(Cell::new(2, 2)));
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 70);
        assert_eq!(state.status, GameStatus::Running);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn degenerate_grid_is_enlarged_to_minimum() {
        let mut state = GameState::new(GridSize { rows: 0, cols: 5 }, 0);

        assert_eq!(state.bounds(), GridSize { rows: 4, cols: 5 });
        assert!(state.food.position.is_within_bounds(state.bounds()));

        state.tick();
        assert_eq!(state.snake.head(), Cell::new(2, 3));
    }

    #[test]
    fn food_avoids_snake_when_requested() {
        let mut state = GameState::new_with_seed(GridSize { rows: 3, cols: 3 }, 0, 9)
            .with_food_placement(FoodPlacement::AvoidSnake);
        state.snake = Snake::from_segments(vec![Cell::new(1, 1), Cell::new(1, 0), Cell::new(0, 0)]);
        state.direction = Direction::Right;
        state.food = Food::new(Cell::new(1, 2));

        state.tick();

        assert_eq!(state.snake.len(), 4);
        assert!(!state.snake.occupies(state.food.position));
    }
}
