#![allow(clippy::cast_possible_truncation)]

use super::{
    profile::SkyTone,
    surface::{LinearGradient, Point, Rgba, Viewport},
};

const TIME_SCALE: f64 = 0.0003;

/// Diagonal two-stop wash whose stop alphas breathe slowly with wall-clock time.
#[must_use]
pub fn sky_gradient(tone: SkyTone, viewport: Viewport, wall_ms: f64) -> LinearGradient {
    let t = wall_ms * TIME_SCALE;
    let wave = |alpha: f64, freq: f64, depth: f64, cosine: bool| {
        let phase = t * freq;
        let osc = if cosine { phase.cos() } else { phase.sin() };
        (alpha + osc * depth) as f32
    };

    let (from, to) = match tone {
        SkyTone::Clear => (
            Rgba::new(255, 225, 150, wave(0.15, 1.0, 0.05, false)),
            Rgba::new(135, 206, 235, wave(0.1, 0.7, 0.03, true)),
        ),
        SkyTone::Overcast => (
            Rgba::new(200, 210, 225, wave(0.2, 0.2, 0.05, false)),
            Rgba::new(160, 170, 190, wave(0.15, 0.25, 0.04, true)),
        ),
        SkyTone::Wet => (
            Rgba::new(80, 110, 140, wave(0.25, 0.5, 0.05, false)),
            Rgba::new(40, 60, 90, wave(0.2, 0.6, 0.04, true)),
        ),
        SkyTone::Snow => (
            Rgba::new(230, 245, 255, wave(0.25, 0.3, 0.05, false)),
            Rgba::new(210, 230, 250, wave(0.2, 0.4, 0.04, true)),
        ),
        SkyTone::Other => (Rgba::new(67, 97, 238, 0.15), Rgba::new(58, 12, 163, 0.1)),
    };

    LinearGradient {
        start: Point::new(0.0, 0.0),
        end: Point::new(viewport.width_f32(), viewport.height_f32()),
        from,
        to,
    }
}
