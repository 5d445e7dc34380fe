use std::path::PathBuf;
use std::time::Duration;

use ratatui::symbols::border;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub rows: u16,
    pub cols: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }

    /// Returns this size raised to at least the minimum playable grid.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            rows: self.rows.max(MIN_GRID_ROWS),
            cols: self.cols.max(MIN_GRID_COLS),
        }
    }

    /// Derives the grid from a display area measured in pixels.
    ///
    /// Each axis is the floor of the area divided by the cell size. The
    /// result never drops below the minimum playable grid.
    #[must_use]
    pub fn from_display_area(width_px: u32, height_px: u32) -> Self {
        let cols = width_px / CELL_WIDTH_PX;
        let rows = height_px / CELL_HEIGHT_PX;

        Self {
            rows: saturate_axis(rows),
            cols: saturate_axis(cols),
        }
        .clamped()
    }

    /// Derives the grid from the terminal area left over for the board.
    #[must_use]
    pub fn from_terminal_area(columns: u16, lines: u16) -> Self {
        Self::from_display_area(
            u32::from(columns) * u32::from(TERMINAL_CELL_WIDTH_PX),
            u32::from(lines) * u32::from(TERMINAL_CELL_HEIGHT_PX),
        )
    }
}

fn saturate_axis(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Width of one board cell in pixel units.
pub const CELL_WIDTH_PX: u32 = 30;

/// Height of one board cell in pixel units.
pub const CELL_HEIGHT_PX: u32 = 30;

/// Nominal pixel width of one terminal column.
pub const TERMINAL_CELL_WIDTH_PX: u16 = 15;

/// Nominal pixel height of one terminal line.
pub const TERMINAL_CELL_HEIGHT_PX: u16 = 30;

/// Terminal columns used to draw one board cell.
pub const BOARD_CELL_COLUMNS: u16 = 2;

/// Smallest grid that still contains the start cell plus room to move.
pub const MIN_GRID_ROWS: u16 = 4;
pub const MIN_GRID_COLS: u16 = 4;

/// Terminal lines reserved for the HUD below the board.
pub const HUD_HEIGHT: u16 = 1;

/// Head position on start and restart, as (row, col).
pub const START_CELL: (i32, i32) = (2, 2);

/// Points granted per food eaten.
pub const FOOD_POINTS: u32 = 10;

/// Simulation tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 300;

/// Elapsed-time display interval in milliseconds.
pub const CLOCK_INTERVAL_MS: u64 = 1000;

/// Minimum dominant-axis displacement, in pixels, for a drag to count as a swipe.
pub const MIN_SWIPE_DISTANCE_PX: f32 = 30.0;

/// Storage key holding the best score.
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Poll granularity of the main loop.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Block glyph used for snake segments and food.
pub const GLYPH_BLOCK: &str = "██";

/// Rounded border around the board.
pub const BOARD_BORDER: border::Set = border::ROUNDED;

/// Runtime settings resolved from the command line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Settings {
    pub tick_interval: Duration,
    /// Explicit grid; `None` derives it from the terminal size.
    pub grid: Option<GridSize>,
    pub scores_path: PathBuf,
    pub log_path: PathBuf,
    pub food_avoids_snake: bool,
}

impl Settings {
    /// Simulation timer period.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Display timer period.
    #[must_use]
    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(CLOCK_INTERVAL_MS)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            grid: None,
            scores_path: crate::score::scores_path(),
            log_path: PathBuf::from("grid-snake.log"),
            food_avoids_snake: false,
        }
    }
}
