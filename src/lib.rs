//! Grid snake: a single-player snake game on a fixed grid.
//!
//! [`game::GameState`] is the pure per-tick state machine. Everything else
//! is a collaborator around it: [`input`] turns key presses and drags into
//! directions, [`clock`] drives the simulation and elapsed-time timers,
//! [`score`] persists the best score, [`renderer`] draws a frame, and
//! [`session::Session`] wires them together.

pub mod clock;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
