use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::clock::ElapsedTime;
use crate::config::{BOARD_BORDER, BOARD_CELL_COLUMNS, GLYPH_BLOCK, GridSize};
use crate::game::GameState;
use crate::session::Screen;
use crate::snake::Cell;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_start_menu};

/// Everything one frame needs, borrowed between ticks.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub state: &'a GameState,
    pub screen: Screen,
    pub elapsed: ElapsedTime,
}

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, view: FrameView<'_>) {
    let state = view.state;
    let area = frame.area();
    let play_area = render_hud(
        frame,
        area,
        HudInfo {
            score: state.score,
            high_score: state.high_score,
            elapsed: view.elapsed,
        },
    );

    let board_area = board_rect(play_area, state.bounds());
    let block = Block::bordered()
        .border_set(BOARD_BORDER)
        .border_style(Style::new().fg(Color::Gray));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, state);
    render_snake(frame, inner, state);

    match view.screen {
        Screen::Start => render_start_menu(frame, board_area, state.high_score),
        Screen::GameOver => render_game_over_menu(frame, board_area, state.score, state.high_score),
        Screen::Playing => {}
    }
}

/// Centers a bordered board of `bounds` cells inside `area`.
#[must_use]
pub fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.cols.saturating_mul(BOARD_CELL_COLUMNS).saturating_add(2);
    let height = bounds.rows.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);

    board
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let Some((x, y)) = cell_to_terminal(inner, state.bounds(), state.food.position) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_BLOCK, Style::new().fg(Color::Red));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let body = Style::new().fg(Color::Green);
    let head = Style::new().fg(Color::LightGreen).add_modifier(Modifier::BOLD);

    let buffer = frame.buffer_mut();
    // Tail first so the head wins where segments overlap.
    for (index, segment) in state.snake.segments().enumerate().rev() {
        let Some((x, y)) = cell_to_terminal(inner, state.bounds(), *segment) else {
            continue;
        };

        let style = if index == 0 { head } else { body };
        buffer.set_string(x, y, GLYPH_BLOCK, style);
    }
}

/// Maps a grid cell to the terminal position of its left column.
#[must_use]
pub fn cell_to_terminal(inner: Rect, bounds: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if !cell.is_within_bounds(bounds) {
        return None;
    }

    let col = u16::try_from(cell.col).ok()?;
    let row = u16::try_from(cell.row).ok()?;

    let x = inner.x.saturating_add(col.saturating_mul(BOARD_CELL_COLUMNS));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(BOARD_CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
