use std::path::PathBuf;
use std::time::{Duration, Instant};

use grid_snake::config::{GridSize, HIGH_SCORE_KEY, Settings};
use grid_snake::food::Food;
use grid_snake::game::{GameState, GameStatus};
use grid_snake::input::{Direction, GameInput};
use grid_snake::score::{MemoryStore, ScoreStore};
use grid_snake::session::{Screen, Session};
use grid_snake::snake::{Cell, Snake};

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut state = GameState::new_with_seed(GridSize { rows: 10, cols: 10 }, 0, 42);
    state.food = Food::new(Cell::new(2, 3));

    state.tick();
    assert_eq!(state.status, GameStatus::Running);
    assert_eq!(state.score, 10);
    assert_eq!(
        state.snake.segments().copied().collect::<Vec<_>>(),
        vec![Cell::new(2, 3), Cell::new(2, 2)]
    );

    state.food = Food::new(Cell::new(9, 9));
    state.set_direction(Direction::Up);
    state.tick();
    state.tick();
    assert_eq!(state.status, GameStatus::Running);
    assert_eq!(state.snake.head(), Cell::new(0, 3));
    assert_eq!(state.snake.len(), 2);

    state.tick();
    assert_eq!(state.status, GameStatus::GameOver);
    assert_eq!(state.snake.head(), Cell::new(0, 3));
    assert_eq!(state.score, 10);
}

#[test]
fn corner_start_moving_up_is_immediately_over() {
    let mut state = GameState::new_with_seed(GridSize { rows: 10, cols: 10 }, 0, 7);
    state.snake = Snake::new(Cell::new(0, 0));
    state.set_direction(Direction::Up);

    state.tick();

    assert_eq!(state.status, GameStatus::GameOver);
}

#[test]
fn timed_session_plays_a_full_round() {
    let settings = Settings {
        tick_interval: Duration::from_millis(300),
        grid: Some(GridSize { rows: 6, cols: 6 }),
        scores_path: PathBuf::from("unused.json"),
        log_path: PathBuf::from("unused.log"),
        food_avoids_snake: false,
    };
    let state = GameState::new_with_seed(GridSize { rows: 6, cols: 6 }, 0, 5);
    let mut session = Session::from_state(&settings, state, MemoryStore::default());
    let start = Instant::now();

    session.handle_input(GameInput::Confirm, start);
    session.state_mut().food = Food::new(Cell::new(2, 4));

    // Head runs right from (2, 2): eats at (2, 4), hits the wall after (2, 5).
    let mut now = start;
    while session.screen() == Screen::Playing {
        now += Duration::from_millis(100);
        session.poll(now);
        if session.state().score > 0 {
            // Keep the respawned food off the snake's row.
            session.state_mut().food = Food::new(Cell::new(5, 0));
        }
        assert!(now - start < Duration::from_secs(5), "game should end");
    }

    assert_eq!(session.screen(), Screen::GameOver);
    assert_eq!(session.state().score, 10);
    assert_eq!(session.state().snake.head(), Cell::new(2, 5));
    assert_eq!(session.store().get(HIGH_SCORE_KEY), Some(10));
    assert_eq!(session.elapsed().to_string(), "00:01");
}
