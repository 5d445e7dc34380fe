use std::time::Instant;

use log::{debug, info, warn};

use crate::clock::{Clock, ElapsedTime, SingleFlight};
use crate::config::{GridSize, HIGH_SCORE_KEY, Settings};
use crate::food::FoodPlacement;
use crate::game::{GameEvent, GameState, GameStatus};
use crate::input::GameInput;
use crate::score::{ScoreStore, load_high_score};

/// Which overlay, if any, covers the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Screen {
    Start,
    Playing,
    GameOver,
}

/// Result of feeding one input into the session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns one game together with its timers and score storage.
pub struct Session<S: ScoreStore> {
    state: GameState,
    clock: Clock,
    store: S,
    screen: Screen,
    tick_flight: SingleFlight,
}

impl<S: ScoreStore> Session<S> {
    /// Creates a session on the start screen, reading the stored best score.
    pub fn new(settings: &Settings, bounds: GridSize, store: S) -> Self {
        let high_score = load_high_score(&store);
        let state = GameState::new(bounds, high_score).with_food_placement(placement(settings));
        Self::from_state(settings, state, store)
    }

    /// Wraps an already constructed state, e.g. a seeded one.
    pub fn from_state(settings: &Settings, state: GameState, store: S) -> Self {
        Self {
            state,
            clock: Clock::new(settings.tick_interval(), settings.clock_interval()),
            store,
            screen: Screen::Start,
            tick_flight: SingleFlight::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn elapsed(&self) -> ElapsedTime {
        self.clock.elapsed()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hides the start overlay and arms both timers.
    pub fn start(&mut self, now: Instant) {
        if self.screen != Screen::Start {
            return;
        }

        info!(
            "game started on {}x{} grid, tick {:?}",
            self.state.bounds().rows,
            self.state.bounds().cols,
            self.clock.tick_interval()
        );
        self.screen = Screen::Playing;
        self.clock.start(now);
    }

    /// Resets the game and elapsed time, then re-arms both timers.
    pub fn restart(&mut self, now: Instant) {
        self.clock.reset();
        self.state.reset();
        self.screen = Screen::Playing;
        self.clock.start(now);
        info!("game restarted");
    }

    /// Applies one input event.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> Flow {
        match input {
            GameInput::Quit => return Flow::Quit,
            GameInput::Confirm => match self.screen {
                Screen::Start => self.start(now),
                Screen::GameOver => self.restart(now),
                Screen::Playing => {}
            },
            GameInput::Direction(direction) => {
                if self.screen == Screen::Playing {
                    self.state.set_direction(direction);
                }
            }
        }

        Flow::Continue
    }

    /// Polls the timers. Returns true when visible state changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let fire = self.clock.poll(now);
        if fire.tick {
            self.tick();
        }

        fire.tick || fire.second
    }

    /// Runs one simulation step unless another is already in progress.
    pub fn tick(&mut self) -> bool {
        let Some(_guard) = self.tick_flight.try_enter() else {
            warn!("tick skipped: previous tick still in flight");
            return false;
        };

        self.state.tick();
        for event in self.state.take_events() {
            match event {
                GameEvent::FoodEaten { score } => debug!("food eaten, score {score}"),
                GameEvent::HighScore(high_score) => {
                    if let Err(error) = self.store.set(HIGH_SCORE_KEY, high_score) {
                        warn!("failed to save high score: {error}");
                    }
                }
                GameEvent::Collision { at } => {
                    self.clock.stop();
                    self.screen = Screen::GameOver;
                    info!(
                        "game over at ({}, {}): score {}, time {}",
                        at.row,
                        at.col,
                        self.state.score,
                        self.clock.elapsed()
                    );
                }
            }
        }

        true
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.status == GameStatus::GameOver
    }
}

fn placement(settings: &Settings) -> FoodPlacement {
    if settings.food_avoids_snake {
        FoodPlacement::AvoidSnake
    } else {
        FoodPlacement::Anywhere
    }
}
