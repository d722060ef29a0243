pub mod current;
pub mod forecast;
pub mod history;
pub mod status;

use ratatui::{
    style::Style,
    widgets::{Block, Borders},
};

use crate::ui::theme::Palette;

pub(super) fn panel_block(title: &'static str, palette: Palette) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(palette.text).bg(palette.surface))
        .border_style(Style::default().fg(palette.border).bg(palette.surface))
}
