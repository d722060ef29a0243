use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::{theme::Palette, widgets::panel_block};

/// Recent searches, numbered for the 1-5 shortcuts. The active city is highlighted.
pub fn render(frame: &mut Frame, area: Rect, history: &[String], active: &str, palette: Palette) {
    let block = panel_block("Recent", palette);
    if history.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No recent searches",
            Style::default().fg(palette.muted_text),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let active = active.trim().to_lowercase();
    let mut spans = Vec::with_capacity(history.len() * 2);
    for (idx, city) in history.iter().enumerate() {
        let style = if city.to_lowercase() == active {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        spans.push(Span::styled(
            format!("{} ", idx + 1),
            Style::default().fg(palette.muted_text),
        ));
        spans.push(Span::styled(format!("{city}   "), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
