use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    domain::weather::{ForecastDay, Units, condition_info, convert_temp, round_temp},
    ui::{
        theme::{Palette, rgb_color},
        widgets::panel_block,
    },
};

fn day_temp(day: &ForecastDay, units: Units) -> String {
    format!(
        "{}{}",
        round_temp(convert_temp(day.temp_c, units)),
        units.temp_suffix()
    )
}

/// One-line forecast strip used by the one-shot output.
#[must_use]
pub fn forecast_line(days: &[ForecastDay], units: Units) -> String {
    days.iter()
        .map(|day| format!("{} {} {}", day.weekday, day_temp(day, units), day.condition))
        .collect::<Vec<_>>()
        .join(" │ ")
}

pub fn render(frame: &mut Frame, area: Rect, days: &[ForecastDay], units: Units, palette: Palette) {
    let block = panel_block("5-Day Forecast", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if days.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No forecast yet", Style::default().fg(palette.muted_text))),
            inner,
        );
        return;
    }

    let columns = Layout::horizontal(days.iter().map(|_| Constraint::Fill(1))).split(inner);
    for (day, column) in days.iter().zip(columns.iter()) {
        let info = condition_info(&day.condition);
        let lines = vec![
            Line::from(Span::styled(
                day.weekday.clone(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} {}", info.icon, day_temp(day, units)),
                Style::default().fg(palette.text),
            )),
            Line::from(Span::styled(
                day.condition.clone(),
                Style::default().fg(rgb_color(info.color)),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), *column);
    }
}
