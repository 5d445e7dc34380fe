use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::clock::ElapsedTime;
use crate::config::HUD_HEIGHT;

/// Values displayed in the HUD row.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub score: u32,
    pub high_score: u32,
    pub elapsed: ElapsedTime,
}

/// Renders the HUD row and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, info: HudInfo) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(HUD_HEIGHT)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(info))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        hud_area,
    );

    play_area
}

fn info_line(info: HudInfo) -> Line<'static> {
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let highlight = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    // Score and best are equal while a new record is being set.
    let high_style = if info.score > 0 && info.score == info.high_score {
        highlight
    } else {
        value
    };

    Line::from(vec![
        Span::raw("Score: "),
        Span::styled(info.score.to_string(), value),
        Span::raw(" │ "),
        Span::raw("High Score: "),
        Span::styled(info.high_score.to_string(), high_style),
        Span::raw(" │ "),
        Span::raw("Time: "),
        Span::styled(info.elapsed.to_string(), value),
    ])
}
