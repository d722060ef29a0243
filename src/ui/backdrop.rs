use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::{
    backdrop::{
        Viewport,
        raster::{DEFAULT_SCALE, PixelSurface},
    },
    ui::theme::rgb_color,
};

/// Logical backdrop viewport for a terminal area. Each cell covers two raster rows.
#[must_use]
pub fn viewport_for_area(cols: u16, rows: u16) -> Viewport {
    PixelSurface::viewport_for_raster(u32::from(cols), u32::from(rows) * 2, DEFAULT_SCALE)
}

/// Blits a [`PixelSurface`] with upper half blocks: foreground is the upper
/// raster row, background the lower one.
pub struct BackdropView<'a> {
    surface: &'a PixelSurface,
}

impl<'a> BackdropView<'a> {
    #[must_use]
    pub fn new(surface: &'a PixelSurface) -> Self {
        Self { surface }
    }
}

impl Widget for BackdropView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            let row = usize::from(y - area.top()) * 2;
            for x in area.left()..area.right() {
                let col = usize::from(x - area.left());
                let (Some(upper), Some(lower)) = (
                    self.surface.pixel(col, row),
                    self.surface.pixel(col, row + 1),
                ) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol("▀")
                        .set_fg(rgb_color(upper))
                        .set_bg(rgb_color(lower));
                }
            }
        }
    }
}
