use ratatui::style::Color;

use crate::{backdrop::raster::Rgb, domain::weather::ThemeMode};

/// Panel colours for one theme mode, plus the base the backdrop composites onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub backdrop_base: Rgb,
    pub surface: Color,
    pub text: Color,
    pub muted_text: Color,
    pub accent: Color,
    pub border: Color,
    pub warning: Color,
    pub danger: Color,
}

const LIGHT: Palette = Palette {
    backdrop_base: Rgb::new(232, 238, 252),
    surface: Color::Rgb(248, 249, 252),
    text: Color::Rgb(33, 37, 41),
    muted_text: Color::Rgb(108, 117, 125),
    accent: Color::Rgb(67, 97, 238),
    border: Color::Rgb(173, 181, 219),
    warning: Color::Rgb(176, 112, 0),
    danger: Color::Rgb(200, 35, 51),
};

const DARK: Palette = Palette {
    backdrop_base: Rgb::new(18, 18, 18),
    surface: Color::Rgb(30, 30, 36),
    text: Color::Rgb(230, 232, 238),
    muted_text: Color::Rgb(150, 156, 170),
    accent: Color::Rgb(114, 137, 255),
    border: Color::Rgb(70, 76, 102),
    warning: Color::Rgb(255, 199, 95),
    danger: Color::Rgb(255, 107, 107),
};

impl Palette {
    #[must_use]
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => LIGHT,
            ThemeMode::Dark => DARK,
        }
    }
}

#[must_use]
pub fn rgb_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
