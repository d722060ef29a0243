use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::{AppMode, AppState},
    domain::weather::format_clock,
    ui::theme::Palette,
};

const KEY_HINTS: &str = "q quit · r refresh · u units · t theme · Tab city · 1-5 recent";

/// Left side of the status bar: what the app is doing right now.
#[must_use]
pub fn status_text(state: &AppState) -> String {
    if let Some(err) = &state.last_error {
        return err.clone();
    }
    if state.fetch_in_flight || state.mode == AppMode::Loading {
        return state.loading_message.clone();
    }
    let mock = state
        .weather
        .as_ref()
        .is_some_and(|snapshot| snapshot.report.is_mock);
    match (state.last_success, mock) {
        (Some(at), true) => format!("Offline sample data · {}", format_clock(&at)),
        (Some(at), false) => format!("Updated {}", format_clock(&at)),
        (None, _) => String::new(),
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, palette: Palette) {
    let style = if state.last_error.is_some() {
        Style::default()
            .fg(palette.danger)
            .add_modifier(Modifier::BOLD)
    } else if state
        .weather
        .as_ref()
        .is_some_and(|snapshot| snapshot.report.is_mock)
    {
        Style::default().fg(palette.warning)
    } else {
        Style::default().fg(palette.muted_text)
    };

    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(hint_width(area))]).areas(area);
    let base = Style::default().bg(palette.surface);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(status_text(state), style))).style(base),
        left,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(KEY_HINTS, Style::default().fg(palette.muted_text)))
            .alignment(Alignment::Right)
            .style(base),
        right,
    );
}

#[allow(clippy::cast_possible_truncation)]
fn hint_width(area: Rect) -> u16 {
    let wanted = KEY_HINTS.chars().count() as u16;
    wanted.min(area.width / 2)
}
