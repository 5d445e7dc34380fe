use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event;
use grid_snake::config::{
    DEFAULT_TICK_INTERVAL_MS, FRAME_INTERVAL_MS, GridSize, HUD_HEIGHT, MIN_GRID_COLS,
    MIN_GRID_ROWS, Settings,
};
use grid_snake::error::SnakeError;
use grid_snake::input::InputHandler;
use grid_snake::logging;
use grid_snake::renderer::{self, FrameView};
use grid_snake::score::JsonFileStore;
use grid_snake::session::{Flow, Session};
use grid_snake::terminal_runtime::{TerminalGuard, restore_terminal};
use log::{error, info};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Milliseconds between simulation ticks.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS,
          value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// Grid rows; derived from the terminal size when omitted.
    #[arg(long, requires = "cols", value_parser = clap::value_parser!(u16).range(i64::from(MIN_GRID_ROWS)..))]
    rows: Option<u16>,

    /// Grid columns; derived from the terminal size when omitted.
    #[arg(long, requires = "rows", value_parser = clap::value_parser!(u16).range(i64::from(MIN_GRID_COLS)..))]
    cols: Option<u16>,

    /// Score file location.
    #[arg(long = "scores-file")]
    scores_file: Option<PathBuf>,

    /// Log file location.
    #[arg(long = "log-file", default_value = "grid-snake.log")]
    log_file: PathBuf,

    /// Spawn food only on cells the snake does not occupy.
    #[arg(long = "food-avoids-snake")]
    food_avoids_snake: bool,

    /// Log at debug level.
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            tick_interval: Duration::from_millis(self.tick_ms),
            grid: self
                .rows
                .zip(self.cols)
                .map(|(rows, cols)| GridSize { rows, cols }),
            scores_path: self.scores_file.clone().unwrap_or(defaults.scores_path),
            log_path: self.log_file.clone(),
            food_avoids_snake: self.food_avoids_snake,
        }
    }
}

fn main() -> Result<(), SnakeError> {
    let cli = Cli::parse();
    let settings = cli.settings();

    logging::init(&settings.log_path, cli.verbose)?;
    info!("starting grid-snake {}", env!("CARGO_PKG_VERSION"));

    install_panic_hook();

    let result = run(&settings);
    if let Err(error) = &result {
        error!("exiting with error: {error}");
    }
    result
}

fn run(settings: &Settings) -> Result<(), SnakeError> {
    let store = JsonFileStore::open(&settings.scores_path);
    info!("scores stored at {}", store.path().display());

    let mut guard = TerminalGuard::acquire()?;
    let terminal = guard.terminal();

    let bounds = match settings.grid {
        Some(grid) => grid,
        None => {
            let size = terminal.size()?;
            grid_for_terminal(size.width, size.height)
        }
    };

    let mut session = Session::new(settings, bounds, store);
    let mut input = InputHandler::new();
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);

    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|frame| {
                renderer::render(
                    frame,
                    FrameView {
                        state: session.state(),
                        screen: session.screen(),
                        elapsed: session.elapsed(),
                    },
                );
            })?;
            dirty = false;
        }

        if event::poll(frame_interval)? {
            // Any event may change the picture, including resizes.
            dirty = true;
            let event = event::read()?;
            if let Some(game_input) = input.handle_event(&event) {
                if session.handle_input(game_input, Instant::now()) == Flow::Quit {
                    break;
                }
            }
        }

        dirty |= session.poll(Instant::now());
    }

    info!("quit with high score {}", session.state().high_score);
    Ok(())
}

/// Fits the board, its border, and the HUD into the terminal.
fn grid_for_terminal(width: u16, height: u16) -> GridSize {
    let board_columns = width.saturating_sub(2);
    let board_lines = height.saturating_sub(2 + HUD_HEIGHT);
    GridSize::from_terminal_area(board_columns, board_lines)
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
