pub mod backdrop;
pub mod theme;
pub mod widgets;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::state::AppState,
    domain::weather::{Units, WeatherSnapshot},
    ui::{
        backdrop::BackdropView,
        theme::{Palette, rgb_color},
    },
};

pub const MIN_WIDTH: u16 = 50;
pub const MIN_HEIGHT: u16 = 20;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let palette = Palette::for_mode(state.preferences.theme);

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small. Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("weather-backdrop"),
        );
        frame.render_widget(warning, area);
        return;
    }

    render_backdrop(frame, area, state, palette);

    let [header, current, forecast, history, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(5),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .horizontal_margin(2)
    .areas(area);

    let report = state.weather.as_ref().map(|snapshot| &snapshot.report);
    let units = state.preferences.units;
    widgets::current::render_header(frame, header, report, &state.city, palette);
    widgets::current::render(frame, panel_column(current), report, units, palette);
    widgets::forecast::render(
        frame,
        forecast,
        state
            .weather
            .as_ref()
            .map(|snapshot| snapshot.forecast.as_slice())
            .unwrap_or_default(),
        units,
        palette,
    );
    widgets::history::render(frame, history, &state.preferences.history, &state.city, palette);
    widgets::status::render(frame, status, state, palette);
}

fn render_backdrop(frame: &mut Frame, area: Rect, state: &AppState, palette: Palette) {
    let painted = state
        .backdrop
        .with_backdrop(|backdrop| frame.render_widget(BackdropView::new(backdrop.surface()), area));
    if painted.is_none() {
        let base = Block::default().style(Style::default().bg(rgb_color(palette.backdrop_base)));
        frame.render_widget(base, area);
    }
}

/// Current conditions take the left part of their row so the backdrop shows beside them.
fn panel_column(area: Rect) -> Rect {
    let [left, _] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Fill(1)]).areas(area);
    left
}

/// Plain-text dashboard for `--one-shot`.
#[must_use]
pub fn summary_lines(snapshot: &WeatherSnapshot, units: Units) -> Vec<String> {
    let mut lines = vec![widgets::current::header_line(&snapshot.report)];
    lines.extend(widgets::current::condition_lines(&snapshot.report, units));
    if !snapshot.forecast.is_empty() {
        lines.push(widgets::forecast::forecast_line(&snapshot.forecast, units));
    }
    if snapshot.report.is_mock {
        lines.push("(offline sample data)".to_string());
    }
    lines
}
