use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::{MIN_SWIPE_DISTANCE_PX, TERMINAL_CELL_HEIGHT_PX, TERMINAL_CELL_WIDTH_PX};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    /// Start from the start screen, or restart from game over.
    Confirm,
    Quit,
}

/// Recognises a swipe from a press position and a release position.
///
/// The dominant axis decides the direction; the displacement along it must
/// exceed `threshold` pixels.
#[derive(Debug, Clone, Copy)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
    threshold: f32,
}

impl SwipeTracker {
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            start: None,
            threshold,
        }
    }

    /// Records the press position.
    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Consumes the pending press and returns the swipe direction, if any.
    pub fn end(&mut self, x: f32, y: f32) -> Option<Direction> {
        let (start_x, start_y) = self.start.take()?;
        let delta_x = x - start_x;
        let delta_y = y - start_y;

        if delta_x.abs() > delta_y.abs() {
            if delta_x.abs() > self.threshold {
                return Some(if delta_x > 0.0 {
                    Direction::Right
                } else {
                    Direction::Left
                });
            }
        } else if delta_y.abs() > self.threshold {
            return Some(if delta_y > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            });
        }

        None
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(MIN_SWIPE_DISTANCE_PX)
    }
}

/// Translates terminal events into [`GameInput`]s.
#[derive(Debug, Default)]
pub struct InputHandler {
    swipe: SwipeTracker,
}

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps one terminal event, returning `None` for events with no game meaning.
    pub fn handle_event(&mut self, event: &Event) -> Option<GameInput> {
        match event {
            Event::Key(key) => map_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<GameInput> {
        let (x, y) = terminal_to_pixels(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe.begin(x, y);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => self.swipe.end(x, y).map(GameInput::Direction),
            _ => None,
        }
    }
}

fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Enter | KeyCode::Char(' ' | 'r' | 'R') => GameInput::Confirm,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

fn terminal_to_pixels(column: u16, row: u16) -> (f32, f32) {
    (
        f32::from(column) * f32::from(TERMINAL_CELL_WIDTH_PX),
        f32::from(row) * f32::from(TERMINAL_CELL_HEIGHT_PX),
    )
}
